//! The generator: global options plus ordered input groups, turned into one wkhtmltopdf
//! invocation whose output is captured in memory.
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::input::{Cover, InputGroup, InputSource, Page, Toc};
use crate::options::{GlobalOptions, OutlineOptions};
use crate::process;

/// Output token meaning "write the document to standard output".
pub const STDOUT_TARGET: &str = "-";

/// Builds and runs a wkhtmltopdf invocation.
///
/// Options and pages can be changed freely between calls to [`Generator::create`]; each
/// call recomputes the argument list and the stdin payload from the current state.
#[derive(Default)]
pub struct Generator {
    pub global: GlobalOptions,
    pub outline: OutlineOptions,
    pub cover: Cover,
    pub toc: Toc,
    /// When set, wkhtmltopdf writes here and the in-memory buffer stays empty.
    pub output_file: Option<PathBuf>,

    pages: Vec<Page>,
    binary: Option<PathBuf>,
    stderr: Option<Box<dyn Write + Send>>,
    output: Option<Vec<u8>>,
}

impl Generator {
    /// New generator with the binary resolved up front.
    ///
    /// Fails with [`Error::BinaryNotFound`] when wkhtmltopdf cannot be located. Use
    /// [`Generator::default`] to build argument lists without a binary on the machine.
    pub fn new() -> Result<Self> {
        let binary = process::find_binary()?;
        Ok(Self::with_binary(binary))
    }

    /// New generator that runs the given binary, ignoring the process-wide path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: Some(binary.into()),
            ..Self::default()
        }
    }

    pub fn set_binary(&mut self, binary: impl Into<PathBuf>) {
        self.binary = Some(binary.into());
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Replace all pages.
    pub fn set_pages(&mut self, pages: Vec<Page>) {
        self.pages = pages;
    }

    /// Remove and return all pages.
    pub fn reset_pages(&mut self) -> Vec<Page> {
        std::mem::take(&mut self.pages)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    /// Also copy the tool's diagnostic output to `writer` after each run.
    pub fn set_stderr(&mut self, writer: impl Write + Send + 'static) {
        self.stderr = Some(Box::new(writer));
    }

    /// Input groups in command-line order: cover, table of contents, pages.
    pub fn input_groups(&self) -> Vec<InputGroup<'_>> {
        let mut groups = Vec::with_capacity(self.pages.len() + 2);
        if self.cover.source.is_some() {
            groups.push(InputGroup::Cover(&self.cover));
        }
        if self.toc.include {
            groups.push(InputGroup::Toc(&self.toc));
        }
        groups.extend(self.pages.iter().map(InputGroup::Page));
        groups
    }

    /// Whether any group is delivered over standard input.
    pub fn reads_stdin(&self) -> bool {
        self.input_groups().iter().any(InputGroup::reads_stdin)
    }

    /// The full argument list, without the binary.
    pub fn args(&self) -> Vec<String> {
        let mut args = self.global.args();
        args.extend(self.outline.args());
        for group in self.input_groups() {
            args.extend(group.args());
        }
        args.push(match &self.output_file {
            Some(path) => path.to_string_lossy().into_owned(),
            None => STDOUT_TARGET.to_string(),
        });
        args
    }

    /// Arguments joined by single spaces, for logs and tests.
    pub fn arg_string(&self) -> String {
        self.args().join(" ")
    }

    /// Bytes for standard input: every streamed document, cover first and then pages in
    /// registration order, concatenated without separators. `None` when nothing is
    /// streamed.
    pub fn stream_payload(&mut self) -> Result<Option<Vec<u8>>> {
        let cover = self.cover.source.iter_mut();
        let pages = self.pages.iter_mut().map(|page| &mut page.source);

        let mut payload: Option<Vec<u8>> = None;
        for source in cover.chain(pages) {
            if let InputSource::Stream(stream) = source {
                payload
                    .get_or_insert_with(Vec::new)
                    .extend_from_slice(stream.contents()?);
            }
        }
        Ok(payload)
    }

    /// Run wkhtmltopdf and capture its output.
    ///
    /// On success the in-memory buffer is replaced. On failure it keeps whatever an
    /// earlier successful run left there.
    pub fn create(&mut self) -> Result<()> {
        let binary = match &self.binary {
            Some(binary) => binary.clone(),
            None => process::find_binary()?,
        };
        let payload = self.stream_payload()?;
        let args = self.args();

        debug!("Running {} {}", binary.display(), args.join(" "));
        if let Some(payload) = &payload {
            debug!("Streaming {} bytes over stdin", payload.len());
        }

        let result = process::run(&binary, &args, payload.as_deref());

        if let Some(sink) = self.stderr.as_mut() {
            let diagnostics = match &result {
                Ok(output) => output.stderr.as_slice(),
                Err(Error::Failed { message, .. }) => message.as_bytes(),
                Err(_) => &[][..],
            };
            if let Err(e) = sink.write_all(diagnostics).and_then(|_| sink.flush()) {
                warn!("Failed to forward diagnostics: {}", e);
            }
        }

        let output = result?;
        info!("Generated {} bytes", output.stdout.len());
        self.output = Some(output.stdout);
        Ok(())
    }

    /// Output of the last successful run.
    pub fn bytes(&self) -> Result<&[u8]> {
        self.output.as_deref().ok_or(Error::NoOutput)
    }

    /// Move the output of the last successful run out of the generator.
    pub fn take_bytes(&mut self) -> Result<Vec<u8>> {
        self.output.take().ok_or(Error::NoOutput)
    }

    /// Write the captured output to `path`, returning the number of bytes written.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let bytes = self.bytes()?;
        fs::write(path.as_ref(), bytes)?;
        debug!("Wrote {} bytes to {:?}", bytes.len(), path.as_ref());
        Ok(bytes.len())
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("global", &self.global)
            .field("outline", &self.outline)
            .field("cover", &self.cover)
            .field("toc", &self.toc)
            .field("output_file", &self.output_file)
            .field("pages", &self.pages)
            .field("binary", &self.binary)
            .field("output", &self.output.as_ref().map(Vec::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_generator_only_targets_stdout() {
        let generator = Generator::default();
        assert_eq!(generator.args(), ["-"]);
        assert!(!generator.reads_stdin());
    }

    #[test]
    fn output_file_replaces_stdout_target() {
        let mut generator = Generator::default();
        generator.add_page(Page::new("a.html"));
        generator.output_file = Some(PathBuf::from("out.pdf"));
        assert_eq!(generator.arg_string(), "page a.html out.pdf");
    }

    #[test]
    fn streamed_pages_share_one_trailing_target() {
        let mut generator = Generator::default();
        generator.add_page(Page::from_bytes(b"one".to_vec()));
        generator.add_page(Page::new("two.html"));
        generator.add_page(Page::from_bytes(b"three".to_vec()));

        assert_eq!(generator.arg_string(), "page - page two.html page - -");
        assert!(generator.reads_stdin());
    }

    #[test]
    fn payload_concatenates_cover_then_pages() {
        let mut generator = Generator::default();
        generator.add_page(Page::from_bytes(b"<p>1</p>".to_vec()));
        generator.add_page(Page::new("skip.html"));
        generator.add_page(Page::from_reader(std::io::Cursor::new(b"<p>2</p>".to_vec())));
        generator
            .cover
            .set_input(crate::input::StreamInput::from_bytes(b"<h1>cover</h1>".to_vec()));

        let payload = generator.stream_payload().unwrap().unwrap();
        assert_eq!(payload, b"<h1>cover</h1><p>1</p><p>2</p>");

        // Readers are buffered, so a second computation is identical.
        let again = generator.stream_payload().unwrap().unwrap();
        assert_eq!(again, payload);
    }

    #[test]
    fn interrupted_reader_fails_every_payload() {
        struct Truncated(usize);

        impl std::io::Read for Truncated {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                self.0 += 1;
                match self.0 {
                    1 => {
                        buf[..4].copy_from_slice(b"<htm");
                        Ok(4)
                    }
                    2 => Err(std::io::Error::other("network dropped")),
                    _ => Ok(0),
                }
            }
        }

        let mut generator = Generator::default();
        generator.add_page(Page::from_reader(Truncated(0)));

        assert!(matches!(generator.stream_payload(), Err(Error::Io(_))));
        assert!(matches!(generator.stream_payload(), Err(Error::Io(_))));
    }

    #[test]
    fn no_payload_without_stream_sources() {
        let mut generator = Generator::default();
        generator.add_page(Page::new("a.html"));
        assert!(generator.stream_payload().unwrap().is_none());
    }

    #[test]
    fn output_is_unavailable_before_create() {
        let mut generator = Generator::default();
        assert!(matches!(generator.bytes(), Err(Error::NoOutput)));
        assert!(matches!(generator.take_bytes(), Err(Error::NoOutput)));
        assert!(matches!(
            generator.write_file("never-written.pdf"),
            Err(Error::NoOutput)
        ));
    }

    #[test]
    fn reset_pages_returns_pages_in_order() {
        let mut generator = Generator::default();
        generator.add_page(Page::new("a.html"));
        generator.add_page(Page::new("b.html"));

        let pages = generator.reset_pages();
        assert!(generator.pages().is_empty());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].source.token(), "b.html");
    }
}
