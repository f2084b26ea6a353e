//! Sync command implementation.
//!
//! Fetches the corpus once and merges it into the bundle store. Per-cell
//! failures are reported but do not fail the command; only configuration
//! and fetch errors do.

use tracing::warn;

use crate::cli::Cli;
use crate::cli::commands::sync_config;
use crate::error::{Error, Result};
use crate::sync::{print_report, HttpCorpusSource, Synchronizer};

/// Execute a sync run.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the async runtime cannot be
/// created, or the corpus fetch fails.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = sync_config(cli)?;
    let source = HttpCorpusSource::new(&config.api_url, &config.api_key, config.timeout)?;

    // Create tokio runtime for the fetch
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;
    let report = rt.block_on(Synchronizer::new(&config).run(&source))?;

    if report.has_failures() {
        warn!(
            failed = report.failures.len(),
            "Some namespaces failed to sync; see the report"
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    } else if !cli.quiet {
        print_report(&report);
    }

    Ok(())
}
