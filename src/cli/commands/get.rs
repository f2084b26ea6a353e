//! Get command implementation: look up one translation.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::cli::Cli;
use crate::cli::commands::store_config;
use crate::error::Result;

#[derive(Serialize)]
struct GetOutput<'a> {
    language: &'a str,
    namespace: &'a str,
    key: &'a str,
    value: String,
    found: bool,
}

/// Resolve `key` in `namespace` and print it.
///
/// Missing keys print `default` (or the key itself), matching what the
/// dashboard renders.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the store cannot be
/// read.
pub fn execute(
    cli: &Cli,
    namespace: &str,
    key: &str,
    lang: Option<&str>,
    default: Option<&str>,
) -> Result<()> {
    let store = store_config(cli)?;
    let catalog = Catalog::load(&store.output_dir, &store.languages, &store.default_language)?;

    let language = lang.unwrap_or(&store.default_language);
    let found = catalog.lookup(language, namespace, key).is_some();
    let value = catalog.translate(language, namespace, key, default.unwrap_or(key));

    if cli.json {
        let output = GetOutput {
            language,
            namespace,
            key,
            value,
            found,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{value}");
    }

    Ok(())
}
