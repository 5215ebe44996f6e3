//! Text telemetry extractor
//!
//! The text format is a human-readable report. Each metric sits behind its
//! own label and is matched independently, so lines may appear in any order
//! and any of them may be missing.

use crate::schema::{Metric, Record};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static GENERATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Final Generation: ([0-9]+)").expect("valid regex"));
static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Gen Duration: ([0-9.]+) ms").expect("valid regex"));
static ATTEMPTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mutations Attempted: ([0-9]+)").expect("valid regex"));
static APPLIED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Mutations Applied: ([0-9]+)").expect("valid regex"));
static INSTANCES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"INSTANCES: ([0-9]+)").expect("valid regex"));

/// Extract a record from text-format content. Never fails.
pub fn extract_text(content: &str) -> Record {
    Record {
        generation: first_match(&GENERATION, content).map(Metric::Int),
        duration_ms: first_match(&DURATION, content).map(Metric::Float),
        mutations_attempted: first_match(&ATTEMPTED, content).map(Metric::Int),
        mutations_applied: first_match(&APPLIED, content).map(Metric::Int),
        instance_count: first_match(&INSTANCES, content),
    }
}

/// Parse the first capture of `pattern`. A lexeme that does not parse
/// (`1.2.3`, or an integer past `u64::MAX`) counts as not found.
///
/// The patterns accept ASCII digits only; the simulator never writes other
/// numerals, and Unicode digits such as `٣` would not parse as `u64` anyway.
fn first_match<T: FromStr>(pattern: &Regex, content: &str) -> Option<T> {
    pattern
        .captures(content)?
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
}
