//! Status command implementation.
//!
//! Runs the reconciliation scan on its own: no API key, no network.

use crate::cli::Cli;
use crate::cli::commands::store_config;
use crate::error::Result;
use crate::sync::{print_files, scan_store};

/// Show the bundle files on disk for the configured languages.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or JSON output fails.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = store_config(cli)?;
    let files = scan_store(&store.output_dir, &store.languages);

    if cli.json {
        let output = serde_json::json!({
            "output_dir": store.output_dir.display().to_string(),
            "languages": store.languages,
            "files": files,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Bundle store: {}", store.output_dir.display());
        println!("Languages:    {}", store.languages.join(", "));
        println!();
        print_files(&files);
    }

    Ok(())
}
