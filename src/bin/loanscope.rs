//! loanscope: Extract loan and sale history from property JSON
//!
//! Reads one JSON document (a saved API response) and prints either the
//! loan summary, the full normalized table, or headline counts.
//!
//! Usage:
//!   # Loan summary as CSV from a file
//!   loanscope response.json
//!
//!   # Full parsed table as JSON from stdin
//!   cat response.json | loanscope --view table --format json
//!
//!   # Only 2019 and 2021 loans from one lender
//!   loanscope response.json --year 2019 --year 2021 --lender "Acme Bank"

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use loanscope::{extract_history, ExportFormat, FocusFilter, HistoryConfig, TableWriter};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum View {
    /// Purchase date, loan type and lender
    Focus,
    /// Every normalized record
    Table,
    /// Record counts only
    Summary,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Json => ExportFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "loanscope")]
#[command(about = "Extract loan and sale history from property JSON", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// What to print
    #[arg(long, value_enum, default_value = "focus")]
    view: View,

    /// Output encoding
    #[arg(long, short = 'f', value_enum, default_value = "csv")]
    format: Format,

    /// Keep only summary rows from this year (repeatable)
    #[arg(long = "year")]
    years: Vec<i32>,

    /// Keep only summary rows from this lender (repeatable)
    #[arg(long = "lender")]
    lenders: Vec<String>,

    /// Maximum nesting depth to search (default: 128)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log pipeline details to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Build config
    let mut config = HistoryConfig::default();
    if let Some(depth) = args.max_depth {
        config.max_depth = depth;
    }

    let document = read_document(args.input.as_deref())?;
    let report = extract_history(&document, &config).context("Failed to extract history")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.view {
        View::Summary => match args.format {
            Format::Csv => writeln!(out, "{}", report.summary())?,
            Format::Json => writeln!(out, "{}", serde_json::to_string(&report.summary())?)?,
        },
        View::Table => {
            let mut writer = TableWriter::new(&mut out, args.format.into());
            writer.write(&report.table)?;
            writer.flush()?;
        }
        View::Focus => {
            let filter = FocusFilter {
                years: args.years.into_iter().collect(),
                lenders: args.lenders.into_iter().collect(),
            };
            let focus = if filter.is_empty() {
                report.focus.clone()
            } else {
                report.focus.filtered(&filter)
            };
            debug!(before = report.focus.len(), after = focus.len(), "applied filters");

            let mut writer = TableWriter::new(&mut out, args.format.into());
            writer.write(&focus)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Read the whole input, parsing with SIMD when possible
fn read_document(input: Option<&str>) -> Result<Value> {
    let reader = if let Some(file_path) = input {
        let file = File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let mut content = Vec::new();
    BufReader::new(reader)
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    // simd-json parses in place, so keep the original bytes for the fallback
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!(%err, "SIMD parse failed, retrying with serde_json");
            serde_json::from_slice(&content).context("Failed to parse JSON")
        }
    }
}
