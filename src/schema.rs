//! Record types for gentab
//!
//! A `Record` holds the five metrics pulled out of one telemetry file.
//! A `Row` pairs it with the file name for structured output.

use serde::Serialize;
use std::fmt;

/// A numeric value as the source wrote it.
///
/// JSON telemetry may write a count as `5.0` or a duration as `40`; the
/// value is kept in that shape rather than coerced to the field's usual type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Int(u64),
    Negative(i64),
    Float(f64),
}

impl From<&serde_json::Number> for Metric {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(v) = n.as_u64() {
            Self::Int(v)
        } else if let Some(v) = n.as_i64() {
            Self::Negative(v)
        } else {
            Self::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Negative(v) => write!(f, "{v}"),
            // Floats keep a fractional part so `3.0` never reads as an integer.
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{v:.1}")
            }
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Metrics extracted from a single `gen_*.txt` file.
/// Every field is optional: `None` means the value was not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    /// Generation index reported by the file
    pub generation: Option<Metric>,

    /// Wall-clock duration of the generation, in milliseconds
    pub duration_ms: Option<Metric>,

    pub mutations_attempted: Option<Metric>,

    /// Not checked against `mutations_attempted`, only reported
    pub mutations_applied: Option<Metric>,

    /// Population size for the generation
    pub instance_count: Option<u64>,
}

/// One output row: a file and either its record or the reason it failed.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    /// File name, relative to the data directory
    pub file: String,

    #[serde(flatten)]
    pub record: Record,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Row {
    pub fn ok(file: String, record: Record) -> Self {
        Self {
            file,
            record,
            error: None,
        }
    }

    pub fn failed(file: String, error: String) -> Self {
        Self {
            file,
            record: Record::default(),
            error: Some(error),
        }
    }
}
