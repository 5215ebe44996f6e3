//! Error types for extraction and per-file processing

use thiserror::Error;

/// Failure to turn file content into a `Record`.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level")]
    NotAnObject,
}

/// Anything that goes wrong while handling one file.
/// Never fatal to the run: the report turns it into an error row.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("{source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl From<std::io::Error> for FileError {
    fn from(source: std::io::Error) -> Self {
        Self::Read { source }
    }
}
