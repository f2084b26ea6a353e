//! Translation lookup over the persisted store.
//!
//! Mirrors how the dashboard consumes the bundles: every
//! `<namespace>.json` of every language is loaded eagerly, keys are
//! resolved by dot-delimited path, and a (language, namespace) that was
//! never synced falls back to the default language.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::sync::{list_bundle_files, lookup, namespace_of, read_bundle, Bundle, Node, SyncResult};

/// All bundles for a set of languages, keyed by language then namespace.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    bundles: HashMap<String, HashMap<String, Bundle>>,
    default_language: String,
}

impl Catalog {
    /// Load every bundle for `languages` (and the default language) from
    /// `output_dir`.
    ///
    /// Unreadable bundles are loaded as empty, like the sync reader does.
    ///
    /// # Errors
    ///
    /// Returns an error if a language directory or bundle cannot be read at
    /// the I/O level.
    pub fn load(output_dir: &Path, languages: &[String], default_language: &str) -> SyncResult<Self> {
        let mut catalog = Self {
            bundles: HashMap::new(),
            default_language: default_language.to_string(),
        };

        let default = std::iter::once(default_language);
        for language in languages.iter().map(String::as_str).chain(default) {
            if catalog.bundles.contains_key(language) {
                continue;
            }

            let mut namespaces = HashMap::new();
            for path in list_bundle_files(&output_dir.join(language))? {
                let stored = read_bundle(&path)?;
                if stored.recovered.is_some() {
                    warn!(path = %path.display(), "Loaded unreadable bundle as empty");
                }
                namespaces.insert(namespace_of(&path), stored.bundle);
            }
            debug!(language, namespaces = namespaces.len(), "Loaded language");
            catalog.bundles.insert(language.to_string(), namespaces);
        }

        Ok(catalog)
    }

    /// Build a catalog from in-memory bundles.
    #[must_use]
    pub fn from_bundles(
        bundles: HashMap<String, HashMap<String, Bundle>>,
        default_language: &str,
    ) -> Self {
        Self {
            bundles,
            default_language: default_language.to_string(),
        }
    }

    /// The language used when a requested bundle was never populated.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Namespaces loaded for a language, sorted.
    #[must_use]
    pub fn namespaces(&self, language: &str) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self
            .bundles
            .get(language)
            .map(|ns| ns.keys().map(String::as_str).collect())
            .unwrap_or_default();
        namespaces.sort_unstable();
        namespaces
    }

    /// The bundle for (language, namespace), falling back to the default
    /// language when the pair was never populated.
    #[must_use]
    pub fn bundle(&self, language: &str, namespace: &str) -> Option<&Bundle> {
        self.exact(language, namespace)
            .or_else(|| self.exact(&self.default_language, namespace))
    }

    fn exact(&self, language: &str, namespace: &str) -> Option<&Bundle> {
        self.bundles.get(language)?.get(namespace)
    }

    /// Resolve a key path to a terminal value.
    ///
    /// Returns `None` when the key is missing or points at a nested bundle.
    #[must_use]
    pub fn lookup(&self, language: &str, namespace: &str, key_path: &str) -> Option<&Value> {
        let bundle = self.bundle(language, namespace)?;
        match lookup(bundle, key_path).map(Node::of) {
            Some(Node::Terminal(value)) => Some(value),
            Some(Node::Bundle(_)) | None => None,
        }
    }

    /// Translate a key, returning `default` when it cannot be resolved.
    ///
    /// Strings are returned as-is; other terminals as their JSON text.
    #[must_use]
    pub fn translate(&self, language: &str, namespace: &str, key_path: &str, default: &str) -> String {
        match self.lookup(language, namespace, key_path) {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }
}
