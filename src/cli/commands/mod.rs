//! Command implementations.

pub mod completions;
pub mod get;
pub mod status;
pub mod sync;

use crate::cli::Cli;
use crate::config::{StoreConfig, SyncConfig};
use crate::error::Result;

/// Build the store configuration from parsed arguments.
///
/// # Errors
///
/// Returns an error if the language list is invalid.
pub fn store_config(cli: &Cli) -> Result<StoreConfig> {
    StoreConfig::new(
        cli.output_dir.clone(),
        &cli.languages,
        cli.default_language.as_deref(),
    )
}

/// Build the full sync configuration from parsed arguments.
///
/// # Errors
///
/// Returns an error if the API key is missing or the store configuration
/// is invalid.
pub fn sync_config(cli: &Cli) -> Result<SyncConfig> {
    SyncConfig::new(
        store_config(cli)?,
        &cli.api_url,
        cli.api_key.as_deref(),
        cli.timeout,
        cli.dry_run,
    )
}
