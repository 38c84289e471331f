use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Standard input can only be used once, got `-` {count} times")]
    RepeatedStdin { count: usize },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Cannot read preset {path:?}: {source}")]
    Preset {
        path: PathBuf,
        #[source]
        source: wkpdf::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wkpdf(#[from] wkpdf::Error),
}
