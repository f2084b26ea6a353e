//! Configuration management.
//!
//! Configuration is resolved once at process start (flag > environment >
//! default, handled by clap) and turned into the structs below. Nothing
//! deeper in the crate reads the environment.
//!
//! # Environment
//!
//! - `LOCALE_SYNC_API_URL` - translation corpus endpoint
//! - `LOCALE_SYNC_API_KEY` - API key, sent as the `api_key` query parameter
//! - `LOCALE_SYNC_LANGUAGES` - comma-separated languages (default: `en,ar`)
//! - `LOCALE_SYNC_OUTPUT_DIR` - bundle root (default: `public/locales`)
//! - `LOCALE_SYNC_DEFAULT_LANGUAGE` - lookup fallback (default: first language)
//! - `LOCALE_SYNC_TIMEOUT` - request timeout in seconds (default: none)

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::sync::validate_segment;

/// Default translation corpus endpoint.
pub const DEFAULT_API_URL: &str = "https://api.i18nexus.com/project_resources/translations.json";

/// Default language list: English (LTR) and Arabic (RTL).
pub const DEFAULT_LANGUAGES: &str = "en,ar";

/// Default bundle root.
pub const DEFAULT_OUTPUT_DIR: &str = "public/locales";

/// Where bundles live and which languages are active.
///
/// Enough for everything that only touches the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root directory; bundles go to `<output_dir>/<language>/<namespace>.json`.
    pub output_dir: PathBuf,
    /// Active languages, in configured order, without duplicates.
    pub languages: Vec<String>,
    /// Language used when a requested (language, namespace) was never synced.
    pub default_language: String,
}

impl StoreConfig {
    /// Build a store configuration.
    ///
    /// `languages` is the raw comma-separated list. `default_language`
    /// falls back to the first configured language.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no usable language remains or a language
    /// cannot be used as a directory name.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        languages: &str,
        default_language: Option<&str>,
    ) -> Result<Self> {
        let languages = parse_languages(languages)?;
        let default_language = match default_language.map(str::trim) {
            Some(lang) if !lang.is_empty() => {
                validate_language(lang)?;
                lang.to_string()
            }
            // parse_languages never returns an empty list
            _ => languages[0].clone(),
        };

        Ok(Self {
            output_dir: output_dir.into(),
            languages,
            default_language,
        })
    }
}

/// Everything a sync run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub store: StoreConfig,
    /// Corpus endpoint.
    pub api_url: String,
    /// API credential.
    pub api_key: String,
    /// Request timeout; `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
    /// Merge and report without writing.
    pub dry_run: bool,
}

impl SyncConfig {
    /// Build a sync configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if the key is absent or blank, and
    /// [`Error::Config`] if the endpoint is blank.
    pub fn new(
        store: StoreConfig,
        api_url: &str,
        api_key: Option<&str>,
        timeout_secs: Option<u64>,
        dry_run: bool,
    ) -> Result<Self> {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)?;

        let api_url = api_url.trim();
        if api_url.is_empty() {
            return Err(Error::Config("API URL is empty".to_string()));
        }

        Ok(Self {
            store,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            timeout: timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
            dry_run,
        })
    }
}

/// Parse a comma-separated language list.
///
/// Entries are trimmed, blanks dropped, duplicates dropped keeping the
/// first occurrence.
///
/// # Errors
///
/// Returns [`Error::Config`] if the list ends up empty or contains a name
/// that cannot be a directory.
pub fn parse_languages(raw: &str) -> Result<Vec<String>> {
    let mut languages: Vec<String> = Vec::new();
    for lang in raw.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        validate_language(lang)?;
        if !languages.iter().any(|known| known == lang) {
            languages.push(lang.to_string());
        }
    }

    if languages.is_empty() {
        return Err(Error::Config("no languages configured".to_string()));
    }
    Ok(languages)
}

fn validate_language(lang: &str) -> Result<()> {
    validate_segment(lang).map_err(|reason| Error::Config(format!("invalid language: {reason}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_languages_trims_and_dedupes() {
        let langs = parse_languages(" en , ar,,en, fr ").unwrap();
        assert_eq!(langs, vec!["en", "ar", "fr"]);
    }

    #[test]
    fn test_parse_languages_rejects_empty() {
        assert!(matches!(parse_languages(""), Err(Error::Config(_))));
        assert!(matches!(parse_languages(" , ,"), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_languages_rejects_path_segments() {
        assert!(parse_languages("en,../ar").is_err());
        assert!(parse_languages("..").is_err());
    }

    #[test]
    fn test_store_config_default_language() {
        let config = StoreConfig::new("public/locales", DEFAULT_LANGUAGES, None).unwrap();
        assert_eq!(config.languages, vec!["en", "ar"]);
        assert_eq!(config.default_language, "en");

        let config = StoreConfig::new("out", "en,ar", Some(" ar ")).unwrap();
        assert_eq!(config.default_language, "ar");

        let config = StoreConfig::new("out", "en,ar", Some("")).unwrap();
        assert_eq!(config.default_language, "en");
    }

    #[test]
    fn test_sync_config_requires_api_key() {
        let store = StoreConfig::new("out", "en", None).unwrap();
        assert!(matches!(
            SyncConfig::new(store.clone(), DEFAULT_API_URL, None, None, false),
            Err(Error::MissingApiKey)
        ));
        assert!(matches!(
            SyncConfig::new(store.clone(), DEFAULT_API_URL, Some("   "), None, false),
            Err(Error::MissingApiKey)
        ));

        let config = SyncConfig::new(store, DEFAULT_API_URL, Some(" key "), Some(30), true).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.dry_run);
    }

    #[test]
    fn test_zero_timeout_means_default() {
        let store = StoreConfig::new("out", "en", None).unwrap();
        let config = SyncConfig::new(store, DEFAULT_API_URL, Some("k"), Some(0), false).unwrap();
        assert_eq!(config.timeout, None);
    }
}
