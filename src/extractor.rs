//! Format detection and extractor dispatch

use crate::error::ExtractError;
use crate::json_extractor::extract_json;
use crate::schema::Record;
use crate::text_extractor::extract_text;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Suffix used by the simulator for JSON telemetry
pub const JSON_SUFFIX: &str = ".json.txt";

/// Telemetry file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    /// Run the matching extractor over `content`.
    pub fn extract(self, content: &str) -> Result<Record, ExtractError> {
        match self {
            Self::Text => Ok(extract_text(content)),
            Self::Json => extract_json(content),
        }
    }
}

/// Decide the format of a file.
///
/// A `.json.txt` name is JSON without looking inside. Otherwise the first
/// byte is sniffed: `{` means JSON, anything else (including an empty
/// file) means text. The handle is closed before returning.
pub fn detect_format(path: &Path) -> io::Result<Format> {
    let by_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(JSON_SUFFIX));
    if by_name {
        return Ok(Format::Json);
    }

    let mut first = [0u8; 1];
    let read = File::open(path)?.read(&mut first)?;
    if read == 1 && first[0] == b'{' {
        Ok(Format::Json)
    } else {
        Ok(Format::Text)
    }
}
