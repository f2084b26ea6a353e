//! Corpus fetching.
//!
//! [`CorpusSource`] is the seam between the orchestrator and the network.
//! [`HttpCorpusSource`] issues the single GET against the translation
//! service; an in-memory [`Corpus`] is itself a source, which is what the
//! orchestrator tests use.

use std::time::Duration;

use tracing::debug;

use crate::sync::corpus::Corpus;
use crate::sync::types::FetchError;

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api_key";

/// Longest error body echoed back in [`FetchError::Status`].
const MAX_ERROR_BODY: usize = 200;

/// Something that can produce the full translation corpus.
pub trait CorpusSource: Send + Sync {
    /// Retrieve every language and namespace in one call.
    fn fetch(&self) -> impl std::future::Future<Output = Result<Corpus, FetchError>> + Send;
}

impl CorpusSource for Corpus {
    async fn fetch(&self) -> Result<Corpus, FetchError> {
        Ok(self.clone())
    }
}

/// Fetches the corpus from the translation-management API.
pub struct HttpCorpusSource {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpCorpusSource {
    /// Create a source for `endpoint`.
    ///
    /// `timeout` bounds the whole request; `None` leaves reqwest's default.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Request)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

impl CorpusSource for HttpCorpusSource {
    async fn fetch(&self) -> Result<Corpus, FetchError> {
        debug!(endpoint = %self.endpoint, "Requesting translation corpus");

        // without_url keeps the API key out of error messages
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(API_KEY_PARAM, self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.without_url()))?;
        debug!(bytes = body.len(), "Received translation corpus");

        Corpus::from_json(&body)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
