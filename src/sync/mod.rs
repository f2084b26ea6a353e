//! Translation sync.
//!
//! Pulls the translation corpus from the remote service and merges it into
//! the on-disk bundle store:
//!
//! - **Fetch**: one GET for every language and namespace
//! - **Read**: load `<output>/<language>/<namespace>.json`, missing = empty
//! - **Merge**: recursive, incoming wins, local-only keys survive
//! - **Write**: pretty JSON, atomic rename, skipped when unchanged
//! - **Status**: re-scan the store and report sizes and key counts
//!
//! # Architecture
//!
//! ```text
//! CorpusSource::fetch ──► Corpus
//!                           │
//!       for language in config, for namespace in corpus[language]
//!                           │
//!          read_bundle ──► merge ──► atomic_write
//!                           │
//!                      SyncReport ◄── scan_store
//! ```
//!
//! Each (language, namespace) cell fails on its own; only a failed fetch
//! aborts the run.
//!
//! # Example
//!
//! ```ignore
//! use locale_sync::sync::{HttpCorpusSource, Synchronizer};
//!
//! let source = HttpCorpusSource::new(&config.api_url, &config.api_key, config.timeout)?;
//! let report = Synchronizer::new(&config).run(&source).await?;
//! println!("{} files processed", report.files_processed());
//! ```

mod bundle;
mod corpus;
mod fetch;
mod file;
mod hash;
mod merge;
mod runner;
mod status;
mod types;

// Re-export main types and functions
pub use bundle::{count_keys, leaf_paths, lookup, new_leaf_count, Bundle, Node};
pub use corpus::{Corpus, LanguageEntry};
pub use fetch::{CorpusSource, HttpCorpusSource, API_KEY_PARAM};
pub use file::{
    atomic_write, bundle_path, list_bundle_files, namespace_of, parse_bundle, preserve_corrupt,
    read_bundle, render_bundle, validate_segment, StoredBundle, BUNDLE_EXTENSION,
};
pub use hash::{content_hash, has_changed};
pub use merge::merge;
pub use runner::Synchronizer;
pub use status::{print_files, print_report, scan_store, summarize_file};
pub use types::{
    AdvertisedLanguage, CellAction, CellFailure, CellFailureKind, CellOutcome, CellWarning,
    FetchError, FileSummary, SyncError, SyncReport, SyncResult,
};
