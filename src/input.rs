//! Input groups: the cover, the table of contents and the ordered pages.
//!
//! Each group renders as a marker token (`cover`, `toc`, `page`), its source token and
//! its own options. A group whose source is a byte stream renders the source as `-` and
//! hands its bytes to the generator, which concatenates all streamed documents onto the
//! tool's standard input.
use std::fmt;
use std::io::{self, Read};

use crate::options::{PageOptions, TocOptions};

/// Source token telling wkhtmltopdf to read a document from standard input.
pub const STDIN_SOURCE: &str = "-";

/// Byte content delivered over standard input.
///
/// The reader is drained on first use and the bytes are kept, so a generator can be
/// invoked more than once with the same stream pages.
pub struct StreamInput {
    reader: Option<Box<dyn Read + Send>>,
    buffered: Vec<u8>,
    failed: Option<(io::ErrorKind, String)>,
}

impl StreamInput {
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            buffered: Vec::new(),
            failed: None,
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            reader: None,
            buffered: bytes.into(),
            failed: None,
        }
    }

    /// Full content of the stream, reading the underlying reader if not done yet.
    ///
    /// A read error poisons the stream: the partial bytes are dropped and every later
    /// call returns the same error.
    pub fn contents(&mut self) -> io::Result<&[u8]> {
        if let Some((kind, message)) = &self.failed {
            return Err(io::Error::new(*kind, message.clone()));
        }
        if let Some(mut reader) = self.reader.take() {
            let mut bytes = Vec::new();
            if let Err(e) = reader.read_to_end(&mut bytes) {
                self.failed = Some((e.kind(), e.to_string()));
                return Err(e);
            }
            self.buffered = bytes;
        }
        Ok(&self.buffered)
    }
}

impl fmt::Debug for StreamInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamInput")
            .field("pending_reader", &self.reader.is_some())
            .field("buffered", &self.buffered.len())
            .field("failed", &self.failed.is_some())
            .finish()
    }
}

/// Where a document comes from.
#[derive(Debug)]
pub enum InputSource {
    /// File path or URL, passed on the command line.
    Location(String),
    /// Bytes piped over standard input.
    Stream(StreamInput),
}

impl InputSource {
    /// Token used on the command line for this source.
    pub fn token(&self) -> &str {
        match self {
            InputSource::Location(location) => location,
            InputSource::Stream(_) => STDIN_SOURCE,
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, InputSource::Stream(_))
    }
}

impl From<&str> for InputSource {
    fn from(location: &str) -> Self {
        InputSource::Location(location.to_string())
    }
}

impl From<String> for InputSource {
    fn from(location: String) -> Self {
        InputSource::Location(location)
    }
}

impl From<StreamInput> for InputSource {
    fn from(stream: StreamInput) -> Self {
        InputSource::Stream(stream)
    }
}

/// One document of the output, rendered in registration order.
#[derive(Debug)]
pub struct Page {
    pub source: InputSource,
    pub options: PageOptions,
}

impl Page {
    /// Page read from a path or URL.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            source: InputSource::Location(input.into()),
            options: PageOptions::default(),
        }
    }

    /// Page read from standard input.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            source: InputSource::Stream(StreamInput::from_reader(reader)),
            options: PageOptions::default(),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            source: InputSource::Stream(StreamInput::from_bytes(bytes)),
            options: PageOptions::default(),
        }
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["page".to_string(), self.source.token().to_string()];
        args.extend(self.options.args());
        args
    }
}

/// The optional cover page. Emitted only when it has a source.
#[derive(Debug, Default)]
pub struct Cover {
    pub source: Option<InputSource>,
    pub options: PageOptions,
}

impl Cover {
    pub fn set_input(&mut self, source: impl Into<InputSource>) {
        self.source = Some(source.into());
    }

    pub fn clear_input(&mut self) {
        self.source = None;
    }

    pub fn args(&self) -> Vec<String> {
        let Some(source) = &self.source else {
            return Vec::new();
        };
        let mut args = vec!["cover".to_string(), source.token().to_string()];
        args.extend(self.options.args());
        args
    }
}

/// The optional table of contents. Emitted only when `include` is true.
#[derive(Debug, Default)]
pub struct Toc {
    pub include: bool,
    pub options: PageOptions,
    pub toc_options: TocOptions,
}

impl Toc {
    pub fn args(&self) -> Vec<String> {
        if !self.include {
            return Vec::new();
        }
        let mut args = vec!["toc".to_string()];
        args.extend(self.options.args());
        args.extend(self.toc_options.args());
        args
    }
}

/// Borrowed view of one input group, in command-line order.
#[derive(Debug, Clone, Copy)]
pub enum InputGroup<'a> {
    Cover(&'a Cover),
    Toc(&'a Toc),
    Page(&'a Page),
}

impl InputGroup<'_> {
    pub fn args(&self) -> Vec<String> {
        match self {
            InputGroup::Cover(cover) => cover.args(),
            InputGroup::Toc(toc) => toc.args(),
            InputGroup::Page(page) => page.args(),
        }
    }

    /// Whether this group's document is delivered over standard input.
    pub fn reads_stdin(&self) -> bool {
        match self {
            InputGroup::Cover(cover) => cover.source.as_ref().is_some_and(InputSource::is_stream),
            InputGroup::Toc(_) => false,
            InputGroup::Page(page) => page.source.is_stream(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_renders_marker_source_then_options() {
        let mut page = Page::new("https://www.google.com");
        page.options.disable_smart_shrinking.set(true);

        assert_eq!(
            page.args(),
            ["page", "https://www.google.com", "--disable-smart-shrinking"]
        );
    }

    #[test]
    fn stream_page_uses_stdin_token() {
        let page = Page::from_bytes(b"<html></html>".to_vec());
        assert_eq!(page.args(), ["page", "-"]);
        assert!(InputGroup::Page(&page).reads_stdin());
    }

    #[test]
    fn cover_without_source_is_invisible() {
        let mut cover = Cover::default();
        cover.options.zoom.set(0.75);
        assert!(cover.args().is_empty());

        cover.set_input("cover.html");
        assert_eq!(cover.args(), ["cover", "cover.html", "--zoom", "0.750"]);

        cover.clear_input();
        assert!(cover.args().is_empty());
    }

    #[test]
    fn toc_requires_include() {
        let mut toc = Toc::default();
        toc.toc_options.disable_dotted_lines.set(true);
        assert!(toc.args().is_empty());

        toc.include = true;
        assert_eq!(toc.args(), ["toc", "--disable-dotted-lines"]);
    }

    #[test]
    fn stream_reader_is_drained_once() {
        let mut stream = StreamInput::from_reader(std::io::Cursor::new(b"abc".to_vec()));
        assert_eq!(stream.contents().unwrap(), b"abc");
        assert_eq!(stream.contents().unwrap(), b"abc");
    }

    /// Yields a few bytes, fails once, then reports end of input.
    struct DroppedConnection {
        calls: usize,
    }

    impl DroppedConnection {
        fn new() -> Self {
            Self { calls: 0 }
        }
    }

    impl Read for DroppedConnection {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => {
                    buf[..4].copy_from_slice(b"<htm");
                    Ok(4)
                }
                2 => Err(io::Error::other("connection dropped")),
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn failed_reader_keeps_failing() {
        let mut stream = StreamInput::from_reader(DroppedConnection::new());
        let first = stream.contents().unwrap_err();
        assert_eq!(first.to_string(), "connection dropped");

        let second = stream.contents().unwrap_err();
        assert_eq!(second.kind(), first.kind());
        assert_eq!(second.to_string(), "connection dropped");
    }
}
