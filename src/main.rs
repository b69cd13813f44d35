//! csvpart - partition rows of delimited files against a reference

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use csvpart::config::{InputDescriptor, RunConfig};
use csvpart::error::CompareError;
use csvpart::explain::explain;
use csvpart::loader::load;
use csvpart::model::Table;
use csvpart::output::{write_partition, write_report};
use csvpart::partition::partition;

/// Compare delimited files against a reference file and partition their
/// rows into reference-only, other-only, and common sets
#[derive(Parser, Debug)]
#[command(name = "csvpart")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON run configuration
    #[arg(default_value = "config.json")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!("{failed} comparison(s) failed");
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    use std::io::IsTerminal;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn load_config(path: &Path) -> Result<RunConfig> {
    let config = RunConfig::from_file(path)
        .with_context(|| format!("Failed to read run configuration: {}", path.display()))?;
    config.validate().context("Invalid run configuration")?;
    Ok(config)
}

/// Run every configured comparison against the reference file.
///
/// Comparisons are isolated: a failure in one is logged and counted, and
/// the remaining comparisons still run. Returns the number of failed
/// comparisons. A reference that cannot be loaded is fatal, since every
/// comparison depends on it.
fn run(config: &RunConfig) -> Result<usize> {
    let (reference_descriptor, comparisons) = match config.paths.split_first() {
        Some(split) => split,
        None => {
            return Err(CompareError::TooFewInputs {
                found: 0,
                min: csvpart::config::MIN_INPUT_PATHS,
            }
            .into())
        }
    };

    let reference = load_table(reference_descriptor).with_context(|| {
        format!(
            "Failed to load reference file: {}",
            reference_descriptor.location.display()
        )
    })?;

    let mut failed = 0;
    for descriptor in comparisons {
        if let Err(e) = run_comparison(config, reference_descriptor, &reference, descriptor) {
            error!(
                "comparison against {} failed: {e:#}",
                descriptor.location.display()
            );
            failed += 1;
        }
    }
    Ok(failed)
}

fn load_table(descriptor: &InputDescriptor) -> Result<Table, CompareError> {
    let sort_by = (!descriptor.columns_to_sort_by.is_empty())
        .then_some(descriptor.columns_to_sort_by.as_slice());
    let table = load(
        &descriptor.location,
        descriptor.has_header,
        Some(&descriptor.columns_to_compare),
        sort_by,
    )?;
    info!(
        path = %descriptor.location.display(),
        rows = table.row_count(),
        "loaded input"
    );
    Ok(table)
}

fn run_comparison(
    config: &RunConfig,
    reference_descriptor: &InputDescriptor,
    reference: &Table,
    descriptor: &InputDescriptor,
) -> Result<()> {
    let other = load_table(descriptor)?;
    let parts = partition(reference, &other)?;
    debug!(
        reference_only = parts.reference_only.row_count(),
        other_only = parts.other_only.row_count(),
        both = parts.both.row_count(),
        "partitioned rows"
    );

    let outputs = write_partition(&parts, &descriptor.location, &config.output_directory)?;
    for path in &outputs {
        info!(path = %path.display(), "wrote partition");
    }

    // The join key for the mismatch report is the reference descriptor's
    // sort-column list; without one there is nothing to join on.
    let key_columns = &reference_descriptor.columns_to_sort_by;
    if key_columns.is_empty() {
        debug!("no key columns configured; skipping mismatch report");
        return Ok(());
    }

    let report = explain(&parts.reference_only, &other, key_columns)?;
    let report_path = write_report(&report, &config.output_directory)?;
    info!(
        path = %report_path.display(),
        rows = report.row_count(),
        "wrote mismatch report"
    );
    Ok(())
}
