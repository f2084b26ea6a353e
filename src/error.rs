//! Error types for Locale Sync.
//!
//! Only whole-run failures are modelled here. Anything that goes wrong
//! inside a single (language, namespace) cell is recorded in the
//! [`SyncReport`](crate::sync::SyncReport) instead and never becomes an
//! [`Error`].
//!
//! Provides:
//! - Machine-readable error codes (`ErrorCode`)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for `--json` consumers

use thiserror::Error;

use crate::sync::{FetchError, SyncError};

/// Result type alias for Locale Sync operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Remote corpus
    FetchFailed,

    // Configuration
    MissingApiKey,
    ConfigError,

    // Local store
    StoreError,
    IoError,
    JsonError,

    // Anything else escaping the orchestrator
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::FetchFailed => "FETCH_FAILED",
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::ConfigError => "CONFIG_ERROR",
            Self::StoreError => "STORE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether running the same command again may succeed without changes.
    ///
    /// Only network failures qualify; everything else needs a fix first.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchFailed)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Fatal errors that abort a Locale Sync run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Failed to fetch translations: {0}")]
    Fetch(#[from] FetchError),

    #[error("Store error: {0}")]
    Store(#[from] SyncError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingApiKey => ErrorCode::MissingApiKey,
            Self::Fetch(_) => ErrorCode::FetchFailed,
            Self::Store(_) => ErrorCode::StoreError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Process exit status for this error.
    ///
    /// Every fatal error exits with 1. Runs that complete with per-cell
    /// failures still exit 0 and never construct an `Error`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn exit_code(&self) -> u8 {
        1
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingApiKey => Some(
                "Pass --api-key <KEY> or export LOCALE_SYNC_API_KEY=<KEY>".to_string(),
            ),

            Self::Fetch(FetchError::Status { status: 401 | 403, .. }) => Some(
                "The translation service rejected the API key. Check LOCALE_SYNC_API_KEY."
                    .to_string(),
            ),

            Self::Fetch(FetchError::Status { status: 404, .. }) => Some(
                "The endpoint was not found. Check --api-url / LOCALE_SYNC_API_URL.".to_string(),
            ),

            Self::Fetch(FetchError::Request(_)) => Some(
                "The translation service could not be reached. Nothing was written; re-run once it is available."
                    .to_string(),
            ),

            Self::Config(msg) if msg.contains("language") => Some(
                "Languages are a comma-separated list, e.g. --languages en,ar".to_string(),
            ),

            Self::Fetch(_)
            | Self::Store(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": self.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_errors_are_retryable() {
        let err = Error::Fetch(FetchError::EmptyBody);
        assert_eq!(err.error_code(), ErrorCode::FetchFailed);
        assert!(err.error_code().is_retryable());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_errors_are_not_retryable() {
        let err = Error::Config("no languages configured".to_string());
        assert!(!err.error_code().is_retryable());
        assert_eq!(err.exit_code(), 1);
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_unauthorized_hint_mentions_api_key() {
        let err = Error::Fetch(FetchError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        });
        let hint = err.hint().unwrap();
        assert!(hint.contains("API key"));
    }

    #[test]
    fn test_structured_json_shape() {
        let json = Error::MissingApiKey.to_structured_json();
        assert_eq!(json["error"]["code"], "MISSING_API_KEY");
        assert_eq!(json["error"]["exit_code"], 1);
        assert_eq!(json["error"]["retryable"], false);
        assert!(json["error"]["hint"].is_string());
    }
}
