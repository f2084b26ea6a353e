//! Sync orchestration.
//!
//! One run: fetch the corpus, then for every configured language and every
//! namespace the corpus advertises for it, read → merge → write. Cells are
//! processed one at a time and fail independently. A reconciliation scan of
//! the store closes the run.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::SyncConfig;
use crate::sync::bundle::{count_keys, new_leaf_count, Node};
use crate::sync::corpus::{Corpus, LanguageEntry};
use crate::sync::fetch::CorpusSource;
use crate::sync::file::{
    atomic_write, bundle_path, preserve_corrupt, read_bundle, render_bundle, validate_segment,
};
use crate::sync::hash::{content_hash, has_changed};
use crate::sync::merge::merge;
use crate::sync::status::scan_store;
use crate::sync::types::{
    CellAction, CellFailure, CellFailureKind, CellOutcome, CellWarning, FetchError, SyncReport,
};

/// Drives a sync run against the local store.
pub struct Synchronizer<'a> {
    config: &'a SyncConfig,
}

impl<'a> Synchronizer<'a> {
    /// Create a synchronizer for the given configuration.
    #[must_use]
    pub fn new(config: &'a SyncConfig) -> Self {
        Self { config }
    }

    /// Fetch the corpus from `source` and apply it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the fetch fails; nothing is written then.
    /// Per-cell problems are recorded in the returned report.
    pub async fn run<S: CorpusSource>(&self, source: &S) -> Result<SyncReport, FetchError> {
        info!(
            languages = ?self.config.store.languages,
            output_dir = %self.config.store.output_dir.display(),
            "Fetching translation corpus"
        );
        let corpus = source.fetch().await?;
        Ok(self.apply(&corpus))
    }

    /// Apply an already-fetched corpus to the store.
    #[must_use]
    pub fn apply(&self, corpus: &Corpus) -> SyncReport {
        let store = &self.config.store;
        let mut report = SyncReport::new(self.config.dry_run);
        report.advertised = corpus.advertised();

        for advertised in &report.advertised {
            debug!(language = %advertised.language, namespaces = ?advertised.namespaces, "Corpus advertises");
        }

        for language in &store.languages {
            let namespaces = match corpus.language(language) {
                LanguageEntry::Namespaces(namespaces) => namespaces,
                LanguageEntry::Missing => {
                    warn!(language = %language, "Language not found in corpus, skipping");
                    report.missing_languages.push(language.clone());
                    continue;
                }
                LanguageEntry::Malformed => {
                    warn!(language = %language, "Corpus entry for language is not an object, skipping");
                    report.missing_languages.push(language.clone());
                    continue;
                }
            };

            info!(language = %language, namespaces = namespaces.len(), "Syncing language");
            for (namespace, payload) in namespaces {
                match self.sync_cell(language, namespace, payload, &mut report.warnings) {
                    Ok(outcome) => {
                        info!(
                            language = %language,
                            namespace = %namespace,
                            action = %outcome.action,
                            keys_before = outcome.keys_before,
                            keys_after = outcome.keys_after,
                            new_keys = outcome.new_keys,
                            "Namespace synced"
                        );
                        report.cells.push(outcome);
                    }
                    Err(failure) => {
                        error!(
                            language = %language,
                            namespace = %namespace,
                            kind = %failure.kind,
                            detail = %failure.detail,
                            "Namespace failed"
                        );
                        report.failures.push(failure);
                    }
                }
            }
        }

        report.files = scan_store(&store.output_dir, &store.languages);
        info!(
            processed = report.files_processed(),
            failed = report.failures.len(),
            "Sync complete"
        );
        report
    }

    /// Read, merge and write a single cell.
    fn sync_cell(
        &self,
        language: &str,
        namespace: &str,
        payload: &Value,
        warnings: &mut Vec<CellWarning>,
    ) -> Result<CellOutcome, CellFailure> {
        let fail = |kind, detail: String| CellFailure::new(kind, language, namespace, detail);

        validate_segment(namespace).map_err(|reason| {
            fail(CellFailureKind::InvalidPayload, format!("invalid namespace name: {reason}"))
        })?;
        let incoming = match Node::of(payload) {
            Node::Bundle(bundle) => bundle,
            Node::Terminal(_) => {
                return Err(fail(
                    CellFailureKind::InvalidPayload,
                    "namespace payload is not an object".to_string(),
                ));
            }
        };

        let path = bundle_path(&self.config.store.output_dir, language, namespace);
        let stored =
            read_bundle(&path).map_err(|e| fail(CellFailureKind::Read, e.to_string()))?;

        if let Some(detail) = &stored.recovered {
            let preserved_at = match (&stored.raw, self.config.dry_run) {
                (Some(raw), false) => Some(
                    preserve_corrupt(&path, raw)
                        .map_err(|e| {
                            fail(
                                CellFailureKind::Write,
                                format!("could not preserve unreadable bundle: {e}"),
                            )
                        })?
                        .display()
                        .to_string(),
                ),
                _ => None,
            };
            warnings.push(CellWarning {
                language: language.to_string(),
                namespace: namespace.to_string(),
                detail: detail.clone(),
                preserved_at,
            });
        }

        let merged = merge(&stored.bundle, incoming);
        let rendered =
            render_bundle(&merged).map_err(|e| fail(CellFailureKind::Write, e.to_string()))?;
        let hash = content_hash(&rendered);
        let stored_hash = stored.raw.as_deref().map(content_hash);

        let action = if !stored.existed() {
            CellAction::Created
        } else if has_changed(&hash, stored_hash.as_deref()) {
            CellAction::Updated
        } else {
            CellAction::Unchanged
        };

        if action != CellAction::Unchanged && !self.config.dry_run {
            atomic_write(&path, &rendered)
                .map_err(|e| fail(CellFailureKind::Write, e.to_string()))?;
        }

        Ok(CellOutcome {
            language: language.to_string(),
            namespace: namespace.to_string(),
            action,
            keys_before: count_keys(&stored.bundle),
            keys_after: count_keys(&merged),
            new_keys: new_leaf_count(&stored.bundle, &merged),
            content_hash: hash,
            path: path.display().to_string(),
        })
    }
}
