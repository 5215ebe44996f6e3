//! Directory scan and report output
//!
//! Finds `gen_*.txt` files, extracts a record from each and writes one row
//! per file. A file that fails becomes an error row and the scan goes on.

use crate::error::FileError;
use crate::extractor::detect_format;
use crate::schema::{Record, Row};
use crate::{OutputFormat, ReportOptions};
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::fs;
use std::io::Write;
use std::path::Path;

/// File name prefix written by the simulator
pub const FILE_PREFIX: &str = "gen_";
/// Every telemetry file ends with this, JSON ones included
pub const FILE_SUFFIX: &str = ".txt";

pub const HEADER: &str = "gen\tdur(ms)\tattempted\tapplied\tinstances";

/// Rendered in place of a field that was not found
pub const ABSENT: &str = "None";

/// List the telemetry files directly inside `dir`, sorted.
///
/// Plain byte-wise name order by default, so `gen_10.txt` comes before
/// `gen_2.txt`. With `numeric_sort` the number after `gen_` decides.
pub fn discover_files(dir: &Path, numeric_sort: bool) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let Some(name) = entry.file_name().to_str().map(ToString::to_string) else {
            tracing::debug!(name = ?entry.file_name(), "skipping non-UTF-8 file name");
            continue;
        };
        if name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX) {
            names.push(name);
        }
    }

    if numeric_sort {
        names.sort_by(|a, b| compare_numeric(a, b));
    } else {
        names.sort();
    }

    Ok(names)
}

/// Generation number embedded in a file name, e.g. `gen_12.txt` -> 12
fn embedded_generation(name: &str) -> Option<u64> {
    let rest = name.strip_prefix(FILE_PREFIX)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

// Numbered names first, ascending; the rest by name.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (embedded_generation(a), embedded_generation(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Detect the format of one file and extract its record.
pub fn process_file(path: &Path) -> Result<Record, FileError> {
    let format = detect_format(path)?;
    tracing::debug!(path = %path.display(), ?format, "extracting");
    let content = fs::read_to_string(path)?;
    Ok(format.extract(&content)?)
}

/// Tab-separated rendering of a record, in header order.
pub fn render_row(record: &Record) -> String {
    [
        render(record.generation),
        render(record.duration_ms),
        render(record.mutations_attempted),
        render(record.mutations_applied),
        render(record.instance_count),
    ]
    .join("\t")
}

fn render<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

/// Scan `dir` and write the full report to `out`.
///
/// Per-file failures are written as rows; only listing the directory or
/// writing to `out` can fail the whole report.
pub fn write_report<W: Write>(dir: &Path, options: &ReportOptions, out: &mut W) -> Result<()> {
    let names = discover_files(dir, options.numeric_sort)?;
    tracing::debug!(dir = %dir.display(), count = names.len(), "discovered telemetry files");

    if options.format == OutputFormat::Tsv {
        writeln!(out, "{HEADER}")?;
    }

    for name in names {
        let row = match process_file(&dir.join(&name)) {
            Ok(record) => Row::ok(name, record),
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "failed to parse telemetry file");
                Row::failed(name, e.to_string())
            }
        };
        write_row(&row, options.format, out)?;
    }

    Ok(())
}

fn write_row<W: Write>(row: &Row, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Tsv => match &row.error {
            Some(message) => writeln!(out, "error parsing {}: {}", row.file, message)?,
            None => writeln!(out, "{}", render_row(&row.record))?,
        },
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(row)?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Yaml => {
            writeln!(out, "---")?;
            let yaml = serde_yaml::to_string(row)?;
            write!(out, "{yaml}")?;
        }
    }
    Ok(())
}
