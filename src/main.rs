//! gentab — summarise simulator telemetry into a table
//!
//! Reads every `gen_*.txt` file in a run directory, pulls out the generation
//! number, duration, mutation counts and instance count, and prints one
//! tab-separated row per file.

mod error;
mod extractor;
mod json_extractor;
mod report;
mod schema;
mod text_extractor;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Summarise generation telemetry files into a tab-separated table
#[derive(Parser)]
#[command(name = "gentab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding gen_*.txt telemetry files
    data_dir: PathBuf,

    #[command(flatten)]
    options: ReportOptions,

    /// Debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Clone)]
pub struct ReportOptions {
    /// Output format
    #[arg(long, default_value = "tsv", value_enum)]
    pub format: OutputFormat,

    /// Order files by the generation number in their name instead of by name
    #[arg(long)]
    pub numeric_sort: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
    Yaml,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprint!("{}", e.render());
            println!("{}", Cli::command().render_help());
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);

    match run(&cli.data_dir, &cli.options) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(data_dir: &Path, options: &ReportOptions) -> Result<ExitCode> {
    if !data_dir.is_dir() {
        println!("Directory not found: {}", data_dir.display());
        return Ok(ExitCode::FAILURE);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report::write_report(data_dir, options, &mut handle)?;
    handle.flush()?;

    Ok(ExitCode::SUCCESS)
}
