//! Crate-level error type and `Result` alias.
//! Covers binary lookup, process start and exit failures, stream input and output
//! capture problems, and preset (de)serialization.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Diagnostic prefixes wkhtmltopdf prints when it got no input document.
/// Older releases spell "atleast" as one word.
pub const NO_INPUT_PREFIXES: &[&str] = &[
    "You need to specify at least one input file, and exactly one output file",
    "You need to specify atleast one input file, and exactly one output file",
];

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{name} not found")]
    BinaryNotFound { name: &'static str },

    #[error("failed to start {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Non-zero exit. The message is the tool's trimmed diagnostic output.
    #[error("{message}")]
    Failed { status: Option<i32>, message: String },

    #[error("writing input stream failed: {0}")]
    StreamInput(#[source] std::io::Error),

    #[error("no output produced; call create() first")]
    NoOutput,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid preset: {0}")]
    InvalidPreset(String),

    #[error("invalid base64 page data: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl Error {
    /// True when the tool rejected the invocation because no input was given.
    ///
    /// Matches known message prefixes only, since the wording differs between
    /// wkhtmltopdf releases.
    pub fn is_missing_input(&self) -> bool {
        match self {
            Error::Failed { message, .. } => NO_INPUT_PREFIXES
                .iter()
                .any(|prefix| message.starts_with(prefix)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_matches_both_spellings() {
        for message in [
            "You need to specify at least one input file, and exactly one output file\nUse --help",
            "You need to specify atleast one input file, and exactly one output file",
        ] {
            let err = Error::Failed {
                status: Some(1),
                message: message.to_string(),
            };
            assert!(err.is_missing_input(), "{message}");
            assert!(err.to_string().starts_with("You need to specify"));
        }
    }

    #[test]
    fn other_failures_are_not_missing_input() {
        let err = Error::Failed {
            status: Some(1),
            message: "Exit with code 1 due to network error: HostNotFoundError".to_string(),
        };
        assert!(!err.is_missing_input());
        assert!(!Error::NoOutput.is_missing_input());
    }
}
