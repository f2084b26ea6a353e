//! The remote translation corpus: language → namespace → bundle.
//!
//! Fetched once per run and held in memory. Namespaces are discovered from
//! the corpus itself; only the language list comes from configuration.

use serde_json::{Map, Value};

use crate::sync::bundle::{Bundle, Node};
use crate::sync::types::{AdvertisedLanguage, FetchError};

/// Full remote payload for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    languages: Map<String, Value>,
}

/// How a language appears in the corpus.
#[derive(Debug, Clone, Copy)]
pub enum LanguageEntry<'a> {
    /// The corpus has no entry for the language.
    Missing,
    /// The entry exists but is not an object of namespaces.
    Malformed,
    /// Namespace name → namespace payload, in corpus order.
    Namespaces(&'a Map<String, Value>),
}

impl Corpus {
    /// Wrap an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotAnObject`] unless the value is a JSON object.
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        match value {
            Value::Object(languages) => Ok(Self { languages }),
            _ => Err(FetchError::NotAnObject),
        }
    }

    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is blank, not JSON, or not an object.
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }
        let value: Value = serde_json::from_str(body).map_err(FetchError::InvalidJson)?;
        Self::from_value(value)
    }

    /// Language identifiers present in the corpus, in corpus order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Look up a language.
    #[must_use]
    pub fn language(&self, language: &str) -> LanguageEntry<'_> {
        match self.languages.get(language).map(Node::of) {
            None => LanguageEntry::Missing,
            Some(Node::Bundle(namespaces)) => LanguageEntry::Namespaces(namespaces),
            Some(Node::Terminal(_)) => LanguageEntry::Malformed,
        }
    }

    /// The bundle for one (language, namespace), if both exist and the
    /// namespace payload is an object.
    #[must_use]
    pub fn bundle(&self, language: &str, namespace: &str) -> Option<&Bundle> {
        match self.language(language) {
            LanguageEntry::Namespaces(namespaces) => match namespaces.get(namespace).map(Node::of) {
                Some(Node::Bundle(bundle)) => Some(bundle),
                _ => None,
            },
            LanguageEntry::Missing | LanguageEntry::Malformed => None,
        }
    }

    /// Every namespace the corpus advertises, for every language it carries.
    #[must_use]
    pub fn advertised(&self) -> Vec<AdvertisedLanguage> {
        self.languages
            .iter()
            .map(|(language, entry)| AdvertisedLanguage {
                language: language.clone(),
                namespaces: match Node::of(entry) {
                    Node::Bundle(namespaces) => namespaces.keys().cloned().collect(),
                    Node::Terminal(_) => Vec::new(),
                },
            })
            .collect()
    }
}
