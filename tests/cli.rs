use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn print_args_shows_the_invocation() {
    Command::cargo_bin("wkpdf")
        .unwrap()
        .args([
            "--print-args",
            "--page-size",
            "letter",
            "--orientation",
            "landscape",
            "--grayscale",
            "index.html",
        ])
        .assert()
        .success()
        .stdout("--grayscale --orientation Landscape --page-size Letter page index.html -\n");
}

#[test]
fn stdin_input_becomes_stream_page() {
    Command::cargo_bin("wkpdf")
        .unwrap()
        .args(["--print-args", "--toc", "-"])
        .write_stdin("<html></html>")
        .assert()
        .success()
        .stdout("toc page - -\n");
}

#[test]
fn repeated_stdin_is_rejected() {
    Command::cargo_bin("wkpdf")
        .unwrap()
        .args(["--print-args", "-", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RepeatedStdin"));
}

#[test]
fn preset_is_saved_and_reloaded() {
    let dir = TempDir::new().unwrap();
    let preset = dir.path().join("preset.json");

    Command::cargo_bin("wkpdf")
        .unwrap()
        .arg("--print-args")
        .arg("--dpi")
        .arg("150")
        .arg("--save-preset")
        .arg(&preset)
        .arg("a.html")
        .assert()
        .success();

    Command::cargo_bin("wkpdf")
        .unwrap()
        .arg("--print-args")
        .arg("--preset")
        .arg(&preset)
        .arg("b.html")
        .assert()
        .success()
        .stdout("--dpi 150 page a.html page b.html -\n");
}

#[test]
fn missing_inputs_fail_without_running() {
    Command::cargo_bin("wkpdf")
        .unwrap()
        .args(["--binary", "/nonexistent/wkhtmltopdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingArgument"));
}
