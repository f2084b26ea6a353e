//! Store reconciliation and report display.
//!
//! The scan re-reads what is actually on disk rather than trusting what the
//! writer meant to write, so silent write failures show up here.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::warn;

use crate::sync::bundle::count_keys;
use crate::sync::file::{list_bundle_files, namespace_of, parse_bundle};
use crate::sync::hash::content_hash;
use crate::sync::types::{CellAction, FileSummary, SyncReport};

/// List and summarize every bundle file under each language directory.
///
/// Files that cannot be read or parsed are reported with unknown size and
/// key count; a language directory that cannot be listed is logged and
/// skipped. Never fails.
#[must_use]
pub fn scan_store(output_dir: &Path, languages: &[String]) -> Vec<FileSummary> {
    let mut files = Vec::new();

    for language in languages {
        let language_dir = output_dir.join(language);
        let paths = match list_bundle_files(&language_dir) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(language = %language, error = %e, "Could not list language directory");
                continue;
            }
        };

        files.extend(paths.into_iter().map(|path| summarize_file(language, path)));
    }

    files
}

/// Summarize one bundle file from disk.
#[must_use]
pub fn summarize_file(language: &str, path: PathBuf) -> FileSummary {
    let mut summary = FileSummary {
        language: language.to_string(),
        namespace: namespace_of(&path),
        path: path.display().to_string(),
        size: None,
        keys: None,
        content_hash: None,
        error: None,
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %summary.path, error = %e, "Could not read bundle for summary");
            summary.error = Some(e.to_string());
            return summary;
        }
    };

    match parse_bundle(&path, &text) {
        Ok(bundle) => {
            summary.size = Some(text.len() as u64);
            summary.keys = Some(count_keys(&bundle));
            summary.content_hash = Some(content_hash(&text));
        }
        Err(e) => {
            warn!(path = %summary.path, error = %e, "Could not parse bundle for summary");
            summary.error = Some(e.to_string());
        }
    }

    summary
}

/// Print a sync report to stdout in a human-readable format.
pub fn print_report(report: &SyncReport) {
    let title = if report.dry_run {
        "Translation Sync (dry run)"
    } else {
        "Translation Sync"
    };
    println!("{}", title.bold().underline());
    println!();

    if !report.advertised.is_empty() {
        println!("{}", "Corpus:".blue().bold());
        for language in &report.advertised {
            println!(
                "  {}: {}",
                language.language,
                if language.namespaces.is_empty() {
                    "(no namespaces)".to_string()
                } else {
                    language.namespaces.join(", ")
                }
            );
        }
        println!();
    }

    for language in &report.missing_languages {
        println!(
            "{} {} is configured but not in the corpus (skipped)",
            "!".yellow().bold(),
            language
        );
    }
    if !report.missing_languages.is_empty() {
        println!();
    }

    if !report.cells.is_empty() {
        println!("{}", "Namespaces:".blue().bold());
        for cell in &report.cells {
            let marker = match cell.action {
                CellAction::Created => "+".green(),
                CellAction::Updated => "~".yellow(),
                CellAction::Unchanged => "=".dimmed(),
            };
            println!(
                "  {marker} {}/{}: {}",
                cell.language,
                cell.namespace,
                cell.summary()
            );
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("{}", "Warnings:".yellow().bold());
        for warning in &report.warnings {
            println!(
                "  {}/{}: unreadable bundle replaced ({})",
                warning.language, warning.namespace, warning.detail
            );
            if let Some(preserved) = &warning.preserved_at {
                println!("    previous content kept at {preserved}");
            }
        }
        println!();
    }

    if !report.failures.is_empty() {
        println!("{}", "Failures:".red().bold());
        for failure in &report.failures {
            println!(
                "  {}/{} [{}]: {}",
                failure.language, failure.namespace, failure.kind, failure.detail
            );
        }
        println!();
    }

    print_files(&report.files);
    println!();

    let summary = format!(
        "{} files processed ({} created, {} updated, {} unchanged), {} failed",
        report.files_processed(),
        report.count(CellAction::Created),
        report.count(CellAction::Updated),
        report.count(CellAction::Unchanged),
        report.failures.len()
    );
    if report.has_failures() {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }
}

/// Print the reconciliation table.
pub fn print_files(files: &[FileSummary]) {
    if files.is_empty() {
        println!("{}", "No bundle files found.".dimmed());
        return;
    }

    println!("{}", "On Disk:".blue().bold());
    for file in files {
        let size = file.size.map_or_else(|| "unknown size".to_string(), format_size);
        let keys = file
            .keys
            .map_or_else(|| "unknown".to_string(), |k| k.to_string());
        println!(
            "  {}/{}.json ({}, {} keys)",
            file.language, file.namespace, size, keys
        );
        if let Some(error) = &file.error {
            println!("    {}", error.dimmed());
        }
    }
}

/// Format a byte size as a human-readable string.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
    }

    #[test]
    fn test_scan_store_empty() {
        let temp_dir = TempDir::new().unwrap();
        let files = scan_store(temp_dir.path(), &["en".to_string(), "ar".to_string()]);
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_store_counts_leaf_keys() {
        let temp_dir = TempDir::new().unwrap();
        let en = temp_dir.path().join("en");
        fs::create_dir_all(&en).unwrap();
        let content = r#"{"a": 1, "b": {"c": 2, "d": 3}, "e": [1, 2, 3]}"#;
        fs::write(en.join("common.json"), content).unwrap();

        let files = scan_store(temp_dir.path(), &["en".to_string()]);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].namespace, "common");
        assert_eq!(files[0].keys, Some(4));
        assert_eq!(files[0].size, Some(content.len() as u64));
        assert_eq!(files[0].content_hash.as_deref(), Some(content_hash(content).as_str()));
        assert!(files[0].error.is_none());
    }

    #[test]
    fn test_scan_store_reports_unknown_for_corrupt_files() {
        let temp_dir = TempDir::new().unwrap();
        let ar = temp_dir.path().join("ar");
        fs::create_dir_all(&ar).unwrap();
        fs::write(ar.join("broken.json"), "{not json").unwrap();
        fs::write(ar.join("common.json"), "{\"hello\": \"مرحبا\"}").unwrap();

        let files = scan_store(temp_dir.path(), &["ar".to_string()]);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].namespace, "broken");
        assert_eq!(files[0].size, None);
        assert_eq!(files[0].keys, None);
        assert!(files[0].error.is_some());
        assert_eq!(files[1].keys, Some(1));
    }

    #[test]
    fn test_scan_store_only_configured_languages() {
        let temp_dir = TempDir::new().unwrap();
        for lang in ["en", "fr"] {
            let dir = temp_dir.path().join(lang);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("common.json"), "{}").unwrap();
        }

        let files = scan_store(temp_dir.path(), &["en".to_string()]);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].language, "en");
        assert_eq!(files[0].keys, Some(0));
    }
}
