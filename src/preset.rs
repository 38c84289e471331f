//! JSON presets: save a configured generator and load it back.
//!
//! Options are stored by field name with their current value. Streamed documents are
//! buffered and stored as base64, so a preset fully describes a run.
use std::io::Read;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::input::{Cover, InputSource, Page, StreamInput, Toc};
use crate::options::{GlobalOptions, OutlineOptions, PageOptions, TocOptions};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredGenerator {
    global: GlobalOptions,
    outline: OutlineOptions,
    cover: StoredCover,
    toc: StoredToc,
    pages: Vec<StoredPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_file: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base64_data: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredCover {
    #[serde(flatten)]
    source: StoredSource,
    options: PageOptions,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredToc {
    include: bool,
    options: PageOptions,
    toc_options: TocOptions,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredPage {
    #[serde(flatten)]
    source: StoredSource,
    options: PageOptions,
}

impl StoredSource {
    fn store(source: &mut InputSource) -> Result<Self> {
        Ok(match source {
            InputSource::Location(location) => Self {
                input: Some(location.clone()),
                base64_data: None,
            },
            InputSource::Stream(stream) => Self {
                input: None,
                base64_data: Some(STANDARD.encode(stream.contents()?)),
            },
        })
    }

    fn load(self) -> Result<Option<InputSource>> {
        match (self.input, self.base64_data) {
            (Some(_), Some(_)) => Err(Error::InvalidPreset(
                "input and base64_data are mutually exclusive".to_string(),
            )),
            (Some(input), None) => Ok(Some(InputSource::Location(input))),
            (None, Some(data)) => Ok(Some(InputSource::Stream(StreamInput::from_bytes(
                STANDARD.decode(data)?,
            )))),
            (None, None) => Ok(None),
        }
    }
}

impl Generator {
    /// Serialize options, input groups and buffered stream content as JSON.
    ///
    /// Takes `&mut self` because stream readers are drained into memory.
    pub fn to_json(&mut self) -> Result<String> {
        let cover = StoredCover {
            source: match self.cover.source.as_mut() {
                Some(source) => StoredSource::store(source)?,
                None => StoredSource::default(),
            },
            options: self.cover.options.clone(),
        };
        let toc = StoredToc {
            include: self.toc.include,
            options: self.toc.options.clone(),
            toc_options: self.toc.toc_options.clone(),
        };
        let mut pages = Vec::with_capacity(self.pages().len());
        for page in self.pages_mut() {
            pages.push(StoredPage {
                source: StoredSource::store(&mut page.source)?,
                options: page.options.clone(),
            });
        }

        let stored = StoredGenerator {
            global: self.global.clone(),
            outline: self.outline.clone(),
            cover,
            toc,
            pages,
            output_file: self.output_file.clone(),
        };
        Ok(serde_json::to_string_pretty(&stored)?)
    }

    /// Build a generator from a JSON preset.
    ///
    /// The binary is not resolved here; it is looked up on the first
    /// [`Generator::create`].
    pub fn from_json(reader: impl Read) -> Result<Self> {
        let stored: StoredGenerator = serde_json::from_reader(reader)?;

        let mut generator = Generator::default();
        generator.global = stored.global;
        generator.outline = stored.outline;
        generator.output_file = stored.output_file;
        generator.cover = Cover {
            source: stored.cover.source.load()?,
            options: stored.cover.options,
        };
        generator.toc = Toc {
            include: stored.toc.include,
            options: stored.toc.options,
            toc_options: stored.toc.toc_options,
        };

        for (index, page) in stored.pages.into_iter().enumerate() {
            let source = page.source.load()?.ok_or_else(|| {
                Error::InvalidPreset(format!("page {} has neither input nor base64_data", index))
            })?;
            generator.add_page(Page {
                source,
                options: page.options,
            });
        }
        Ok(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_without_source_is_rejected() {
        let json = r#"{ "pages": [ { "options": {} } ] }"#;
        let err = Generator::from_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidPreset(_)), "{err}");
    }

    #[test]
    fn page_with_both_sources_is_rejected() {
        let json = r#"{ "pages": [ { "input": "a.html", "base64_data": "YQ==" } ] }"#;
        assert!(matches!(
            Generator::from_json(json.as_bytes()),
            Err(Error::InvalidPreset(_))
        ));
    }

    #[test]
    fn bad_base64_is_reported() {
        let json = r#"{ "pages": [ { "base64_data": "%%%" } ] }"#;
        assert!(matches!(
            Generator::from_json(json.as_bytes()),
            Err(Error::Base64(_))
        ));
    }

    #[test]
    fn empty_object_is_an_empty_generator() {
        let generator = Generator::from_json("{}".as_bytes()).unwrap();
        assert_eq!(generator.args(), ["-"]);
    }
}
