//! CLI definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{DEFAULT_API_URL, DEFAULT_LANGUAGES, DEFAULT_OUTPUT_DIR};

pub mod commands;

/// Locale Sync - pull translations and merge them into locale bundles
///
/// Without a subcommand, runs a sync.
#[derive(Parser, Debug)]
#[command(name = "locale-sync", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Translation corpus endpoint
    #[arg(long, global = true, env = "LOCALE_SYNC_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// API key for the translation service
    #[arg(long, global = true, env = "LOCALE_SYNC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Comma-separated languages to sync
    #[arg(long, global = true, env = "LOCALE_SYNC_LANGUAGES", default_value = DEFAULT_LANGUAGES)]
    pub languages: String,

    /// Root directory for `<language>/<namespace>.json` bundles
    #[arg(long, global = true, env = "LOCALE_SYNC_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Fallback language for lookups (default: first of --languages)
    #[arg(long, global = true, env = "LOCALE_SYNC_DEFAULT_LANGUAGE")]
    pub default_language: Option<String>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, global = true, env = "LOCALE_SYNC_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Merge and report without writing any files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch translations and merge them into the bundle store (default)
    Sync,

    /// Show the bundle files currently on disk
    Status,

    /// Look up a translation the way the dashboard would
    Get {
        /// Namespace (bundle file name without `.json`)
        namespace: String,

        /// Dot-delimited key path, e.g. `players.pdf.pdfDocument`
        key: String,

        /// Language to look up (default: the default language)
        #[arg(long)]
        lang: Option<String>,

        /// Value to print when the key is missing (default: the key itself)
        #[arg(long)]
        default: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}
