#![doc = r#"
WKPDF — a typed driver for the wkhtmltopdf HTML to PDF renderer.

This crate models every wkhtmltopdf option as a typed value, serializes the options of
the document, its cover, its table of contents and each page into the exact argument
order wkhtmltopdf accepts, and runs the tool with documents supplied either by path/URL
or as in-memory bytes piped over standard input. It powers the `wkpdf` CLI and can be
embedded in your own Rust applications.

Requirements
------------
- A `wkhtmltopdf` binary, found through `process::set_path`, next to the running
  executable, on `PATH`, or in the directory named by `WKHTMLTOPDF_PATH`.
- Rust 2024 edition toolchain.

Quick start: render a URL to a file
-----------------------------------
```rust,no_run
use wkpdf::{Generator, Page, PageSize};

fn main() -> wkpdf::Result<()> {
    let mut pdf = Generator::new()?;
    pdf.global.dpi.set(600);
    pdf.global.page_size.set(PageSize::A4);
    pdf.global.margin_bottom.set(40);

    let mut page = Page::new("https://wkhtmltopdf.org/index.html");
    page.options.header_spacing.set(10.0);
    page.options.custom_header.set("X-AppKey", "abcdef");
    pdf.add_page(page);

    pdf.toc.include = true;
    pdf.toc.toc_options.disable_dotted_lines.set(true);

    pdf.create()?;
    pdf.write_file("/out/index.pdf")?;
    Ok(())
}
```

In-memory documents
-------------------
Pages built from bytes or readers are sent over standard input. Several such pages are
concatenated in order into one input stream.

```rust,no_run
use wkpdf::{Generator, Page};

fn main() -> wkpdf::Result<()> {
    let mut pdf = Generator::new()?;
    pdf.add_page(Page::from_bytes("<html><body><h1>Hello</h1></body></html>"));
    pdf.create()?;
    let bytes = pdf.bytes()?;
    println!("{} bytes", bytes.len());
    Ok(())
}
```

Inspecting arguments
--------------------
No binary is needed to build the argument list.

```rust
use wkpdf::{Generator, Page};

let mut pdf = Generator::default();
pdf.global.grayscale.set(true);
pdf.add_page(Page::new("index.html"));
assert_eq!(pdf.arg_string(), "--grayscale page index.html -");
```

Error handling
--------------
All fallible functions return `wkpdf::Result<T>`. Failed runs carry the tool's own
diagnostic text; `Error::is_missing_input` recognises the "no input" message across
wkhtmltopdf releases.

```rust,no_run
use wkpdf::{Error, Generator};

fn main() {
    let mut pdf = Generator::default();
    match pdf.create() {
        Ok(()) => {}
        Err(e) if e.is_missing_input() => eprintln!("add a page first"),
        Err(Error::BinaryNotFound { name }) => eprintln!("install {name}"),
        Err(other) => eprintln!("wkhtmltopdf failed: {other}"),
    }
}
```

Useful modules
--------------
- [`options`] — option primitives and the fixed-order option sets.
- [`input`] — cover, table of contents, pages and their sources.
- [`generator`] — argument assembly, invocation and output capture.
- [`process`] — binary lookup and process execution.
- [`preset`] — JSON save/load of a configured generator.
- [`types`] — `PageSize` and `Orientation`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod error;
pub mod generator;
pub mod input;
pub mod options;
pub mod preset;
pub mod process;
pub mod types;

// Curated public API surface
pub use error::{Error, NO_INPUT_PREFIXES, Result};
pub use generator::Generator;
pub use input::{Cover, InputGroup, InputSource, Page, StreamInput, Toc};
pub use options::{
    BoolOption, CliOption, FloatOption, GlobalOptions, MapOption, OutlineOptions, PageOptions,
    SliceOption, StringOption, TocOptions, UIntOption,
};
pub use types::{Orientation, PageSize};
