//! Sync types: per-cell outcomes, failures and the run report.
//!
//! A *cell* is one (language, namespace) pair. Cells never abort the run;
//! whatever happens to them is recorded here and rendered by the command
//! layer.

use std::path::Path;

use serde::Serialize;

/// What the writer did with a cell's bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellAction {
    /// No bundle existed on disk before this run.
    Created,
    /// An existing bundle was rewritten.
    Updated,
    /// The merged bundle was byte-identical to what was on disk.
    Unchanged,
}

impl std::fmt::Display for CellAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Result of a successfully synced cell.
#[derive(Debug, Clone, Serialize)]
pub struct CellOutcome {
    pub language: String,
    pub namespace: String,
    pub action: CellAction,
    /// Leaf keys in the bundle before merging.
    pub keys_before: usize,
    /// Leaf keys in the merged bundle.
    pub keys_after: usize,
    /// Leaf keys present after the merge that did not exist before.
    pub new_keys: usize,
    /// SHA256 of the serialized bundle.
    pub content_hash: String,
    pub path: String,
}

impl CellOutcome {
    /// One-line progress summary, e.g. `updated, 2→2 keys, +0 new`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, {}→{} keys, +{} new",
            self.action, self.keys_before, self.keys_after, self.new_keys
        )
    }
}

/// Why a cell could not be synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFailureKind {
    /// The existing bundle could not be read (permissions, device errors).
    Read,
    /// The merged bundle could not be written.
    Write,
    /// The corpus entry for the namespace is not a bundle, or its name
    /// cannot be used as a file name.
    InvalidPayload,
}

impl std::fmt::Display for CellFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::InvalidPayload => write!(f, "invalid_payload"),
        }
    }
}

/// A failed cell. Sibling cells are unaffected.
#[derive(Debug, Clone, Serialize)]
pub struct CellFailure {
    pub kind: CellFailureKind,
    pub language: String,
    pub namespace: String,
    pub detail: String,
}

impl CellFailure {
    #[must_use]
    pub fn new(
        kind: CellFailureKind,
        language: &str,
        namespace: &str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            language: language.to_string(),
            namespace: namespace.to_string(),
            detail: detail.into(),
        }
    }
}

/// A recovered problem: the cell still synced.
#[derive(Debug, Clone, Serialize)]
pub struct CellWarning {
    pub language: String,
    pub namespace: String,
    pub detail: String,
    /// Where the unreadable bundle was copied before being replaced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserved_at: Option<String>,
}

/// Namespaces the corpus advertised for one language.
#[derive(Debug, Clone, Serialize)]
pub struct AdvertisedLanguage {
    pub language: String,
    pub namespaces: Vec<String>,
}

/// A bundle file as found on disk by the reconciliation scan.
///
/// `size`, `keys` and `content_hash` are `None` when the file was listed
/// but could not be read back; `error` then says why.
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub language: String,
    pub namespace: String,
    pub path: String,
    pub size: Option<u64>,
    pub keys: Option<usize>,
    pub content_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything that happened during one sync run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// RFC 3339 timestamp of when the run started.
    pub synced_at: String,
    pub dry_run: bool,
    pub advertised: Vec<AdvertisedLanguage>,
    /// Configured languages the corpus did not contain.
    pub missing_languages: Vec<String>,
    pub cells: Vec<CellOutcome>,
    pub warnings: Vec<CellWarning>,
    pub failures: Vec<CellFailure>,
    /// Reconciliation scan of the store after all cells ran.
    pub files: Vec<FileSummary>,
}

impl SyncReport {
    /// Start an empty report stamped with the current time.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            synced_at: chrono::Utc::now().to_rfc3339(),
            dry_run,
            advertised: Vec::new(),
            missing_languages: Vec::new(),
            cells: Vec::new(),
            warnings: Vec::new(),
            failures: Vec::new(),
            files: Vec::new(),
        }
    }

    /// True if any cell failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of cells that synced successfully.
    #[must_use]
    pub fn files_processed(&self) -> usize {
        self.cells.len()
    }

    /// Number of successful cells with the given action.
    #[must_use]
    pub fn count(&self, action: CellAction) -> usize {
        self.cells.iter().filter(|c| c.action == action).count()
    }

    /// Find the outcome for a cell.
    #[must_use]
    pub fn cell(&self, language: &str, namespace: &str) -> Option<&CellOutcome> {
        self.cells
            .iter()
            .find(|c| c.language == language && c.namespace == namespace)
    }
}

/// Errors from the remote corpus fetch. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("server responded with HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body was empty.
    #[error("response body was empty")]
    EmptyBody,

    /// The response body was not JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The response was JSON but not an object keyed by language.
    #[error("response body is not a JSON object keyed by language")]
    NotAnObject,
}

/// Local store errors.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file parsed as JSON but is not a bundle.
    #[error("{path} is not a translation bundle: {message}")]
    NotABundle {
        /// File path.
        path: String,
        /// What was found instead.
        message: String,
    },
}

impl SyncError {
    /// Build a [`SyncError::NotABundle`] for `path`.
    #[must_use]
    pub fn not_a_bundle(path: &Path, message: impl Into<String>) -> Self {
        Self::NotABundle {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

/// Result type for store operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(action: CellAction, before: usize, after: usize, new: usize) -> CellOutcome {
        CellOutcome {
            language: "en-US".to_string(),
            namespace: "common".to_string(),
            action,
            keys_before: before,
            keys_after: after,
            new_keys: new,
            content_hash: String::new(),
            path: "public/locales/en-US/common.json".to_string(),
        }
    }

    #[test]
    fn test_cell_summary_format() {
        let cell = outcome(CellAction::Updated, 2, 2, 0);
        assert_eq!(cell.summary(), "updated, 2→2 keys, +0 new");

        let cell = outcome(CellAction::Created, 0, 5, 5);
        assert_eq!(cell.summary(), "created, 0→5 keys, +5 new");
    }

    #[test]
    fn test_report_counts() {
        let mut report = SyncReport::new(false);
        assert!(!report.has_failures());
        assert_eq!(report.files_processed(), 0);

        report.cells.push(outcome(CellAction::Created, 0, 1, 1));
        report.cells.push(outcome(CellAction::Unchanged, 3, 3, 0));
        report.failures.push(CellFailure::new(
            CellFailureKind::Write,
            "ar",
            "home",
            "permission denied",
        ));

        assert_eq!(report.files_processed(), 2);
        assert_eq!(report.count(CellAction::Created), 1);
        assert_eq!(report.count(CellAction::Updated), 0);
        assert!(report.has_failures());
    }

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_value(CellAction::Unchanged).unwrap();
        assert_eq!(json, "unchanged");
        let json = serde_json::to_value(CellFailureKind::InvalidPayload).unwrap();
        assert_eq!(json, "invalid_payload");
    }
}
