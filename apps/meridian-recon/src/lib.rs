//! # meridian-recon: Batch Reconciliation
//!
//! Runs order drafts exported from the admin dashboard through
//! `meridian-core` and reports their breakdowns and failures.
//!
//! ## Module Structure
//! ```text
//! meridian-recon/src/
//! ├── main.rs    ◄── Entry point, exit codes
//! ├── lib.rs     ◄── Arguments, tracing, run loop (this file)
//! ├── batch.rs   ◄── Single draft or array of drafts
//! ├── config.rs  ◄── recon.toml + MERIDIAN_* environment
//! ├── report.rs  ◄── JSON and text output
//! └── error.rs   ◄── CliError, ConfigError
//! ```
//!
//! ## Output Streams
//! The report goes to stdout; logs and errors go to stderr, so the output
//! can be piped straight into another tool.

pub mod batch;
pub mod config;
pub mod error;
pub mod report;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use meridian_core::{ReconciliationEngine, ReconciliationResult};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::batch::Batch;
use crate::config::{CliConfig, OutputFormat};
use crate::error::{CliError, CliResult};

/// Reconcile payment drafts
///
/// Reads one order draft or a JSON array of drafts and prints each
/// reconciliation: totals, change, outstanding balance and failures.
#[derive(Parser, Debug)]
#[command(name = "meridian-recon", version)]
#[command(about = "Reconciles payment order drafts", long_about = None)]
pub struct Args {
    /// JSON file with a draft or an array of drafts (`-` or absent: stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Report format (overrides the config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit with status 2 when any draft has failures
    #[arg(long)]
    pub strict: bool,
}

/// Counts from one processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub drafts: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

/// Initializes the tracing subscriber for structured logging on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - One event per draft
/// - `RUST_LOG=meridian_recon=trace` - Trace for this crate only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads configuration, reads the input and writes the report to stdout.
pub fn run(args: &Args) -> CliResult<BatchSummary> {
    let config = CliConfig::load(args.config.as_deref())?;
    let format = args.format.unwrap_or(config.output.format);
    let input = read_input(args.file.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = process(&input, &config, format, &mut out)?;
    out.flush()?;

    Ok(summary)
}

/// Reconciles every draft in `input` and writes the report to `out`.
pub fn process<W: Write>(
    input: &str,
    config: &CliConfig,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<BatchSummary> {
    let engine = ReconciliationEngine::new(config.to_engine_config())?;
    let batch = Batch::parse(input)?;

    info!(drafts = batch.len(), ?format, "Reconciling batch");

    let results: Vec<ReconciliationResult> = batch
        .drafts()
        .iter()
        .enumerate()
        .map(|(index, draft)| {
            let result = engine.reconcile(draft);
            debug!(
                draft = index + 1,
                method = %draft.payment_method,
                total = %result.total,
                outstanding = %result.outstanding_balance,
                "Draft reconciled"
            );
            if !result.valid {
                warn!(
                    draft = index + 1,
                    failures = result.failures.len(),
                    "Draft has failures"
                );
            }
            result
        })
        .collect();

    match format {
        OutputFormat::Json => report::write_json(out, &batch, &results)?,
        OutputFormat::Text => report::write_text(out, config, batch.drafts(), &results)?,
    }

    let summary = BatchSummary {
        drafts: results.len(),
        invalid: results.iter().filter(|r| !r.valid).count(),
    };
    info!(
        drafts = summary.drafts,
        invalid = summary.invalid,
        "Batch complete"
    );

    Ok(summary)
}

/// Reads the whole input from `path`, or stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut input = String::new();
            io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
