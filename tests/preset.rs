use wkpdf::{Generator, Orientation, Page, StreamInput};

#[test]
fn preset_round_trip_keeps_arguments_and_streams() {
    let mut pdf = Generator::default();
    pdf.global.orientation.set(Orientation::Landscape);
    pdf.global.copies.set(2);
    pdf.outline.no_outline.set(true);
    pdf.cover.set_input("cover.html");
    pdf.cover.options.zoom.set(0.75);
    pdf.toc.include = true;
    pdf.toc.toc_options.toc_text_size_shrink.set(0.8);

    let mut page = Page::new("https://example.com");
    page.options.cookie.set("session", "abc");
    page.options.run_script.set("console.log(1)");
    pdf.add_page(page);
    pdf.add_page(Page::from_reader(std::io::Cursor::new(
        b"<html>streamed</html>".to_vec(),
    )));

    let json = pdf.to_json().unwrap();
    let mut restored = Generator::from_json(json.as_bytes()).unwrap();

    assert_eq!(restored.args(), pdf.args());
    assert_eq!(
        restored.stream_payload().unwrap(),
        Some(b"<html>streamed</html>".to_vec())
    );
}

#[test]
fn preset_stores_stream_pages_as_base64() {
    let mut pdf = Generator::default();
    pdf.add_page(Page::from_bytes(b"hi".to_vec()));

    let json: serde_json::Value = serde_json::from_str(&pdf.to_json().unwrap()).unwrap();
    assert_eq!(json["pages"][0]["base64_data"], "aGk=");
    assert!(json["pages"][0].get("input").is_none());
}

#[test]
fn stream_cover_survives_round_trip() {
    let mut pdf = Generator::default();
    pdf.cover.set_input(StreamInput::from_bytes(b"cover".to_vec()));

    let json = pdf.to_json().unwrap();
    let mut restored = Generator::from_json(json.as_bytes()).unwrap();
    assert_eq!(restored.arg_string(), "cover - -");
    assert_eq!(restored.stream_payload().unwrap(), Some(b"cover".to_vec()));
}

#[test]
fn hand_written_preset_is_accepted() {
    let json = r#"{
        "global": { "dpi": 300, "grayscale": true },
        "pages": [
            { "input": "a.html", "options": { "allow": ["/srv/assets"] } },
            { "input": "b.html" }
        ],
        "output_file": "out.pdf"
    }"#;

    let pdf = Generator::from_json(json.as_bytes()).unwrap();
    assert_eq!(
        pdf.arg_string(),
        "--dpi 300 --grayscale page a.html --allow /srv/assets page b.html out.pdf"
    );
}
