//! Bundle store file operations.
//!
//! Layout: `<output_dir>/<language>/<namespace>.json`.
//!
//! - Reads tolerate a missing file (empty bundle) and recover from corrupt
//!   content (empty bundle plus a warning for the caller).
//! - Writes are atomic: write to a temp file, sync to disk, then rename.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::sync::bundle::Bundle;
use crate::sync::types::{SyncError, SyncResult};

/// Extension of persisted bundles.
pub const BUNDLE_EXTENSION: &str = "json";

/// Path of the bundle for one (language, namespace).
#[must_use]
pub fn bundle_path(output_dir: &Path, language: &str, namespace: &str) -> PathBuf {
    output_dir
        .join(language)
        .join(format!("{namespace}.{BUNDLE_EXTENSION}"))
}

/// Check that a language or namespace can be used as a single path segment.
///
/// Corpus keys come from a remote service, so anything that could escape
/// the output directory is rejected.
///
/// # Errors
///
/// Returns a description of the problem.
pub fn validate_segment(segment: &str) -> Result<(), String> {
    if segment.trim().is_empty() {
        return Err("name is empty".to_string());
    }
    if segment == "." || segment == ".." {
        return Err(format!("'{segment}' is not a valid name"));
    }
    if segment.contains(['/', '\\', '\0']) {
        return Err(format!("'{segment}' contains a path separator"));
    }
    Ok(())
}

/// A bundle as read from disk.
#[derive(Debug, Clone, Default)]
pub struct StoredBundle {
    /// The parsed bundle; empty when the file was absent or unreadable.
    pub bundle: Bundle,
    /// Raw file text, when the file existed.
    pub raw: Option<String>,
    /// Parse failure that was recovered from by substituting an empty bundle.
    pub recovered: Option<String>,
}

impl StoredBundle {
    /// Whether a file was present on disk.
    #[must_use]
    pub fn existed(&self) -> bool {
        self.raw.is_some()
    }
}

/// Parse bundle text. The top level must be a JSON object.
///
/// # Errors
///
/// Returns an error if the text is not JSON or not an object.
pub fn parse_bundle(path: &Path, text: &str) -> SyncResult<Bundle> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(bundle) => Ok(bundle),
        Value::Array(_) => Err(SyncError::not_a_bundle(path, "found an array")),
        other => Err(SyncError::not_a_bundle(path, format!("found {other}"))),
    }
}

/// Read the persisted bundle at `path`.
///
/// - Missing file: empty bundle, not an error.
/// - Corrupt file: warning logged, empty bundle, `recovered` set.
///
/// # Errors
///
/// Returns an error for any other I/O failure (permissions, device errors,
/// `path` being a directory).
pub fn read_bundle(path: &Path) -> SyncResult<StoredBundle> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredBundle::default()),
        Err(e) => return Err(e.into()),
    };

    match parse_bundle(path, &text) {
        Ok(bundle) => Ok(StoredBundle {
            bundle,
            raw: Some(text),
            recovered: None,
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Existing bundle is unreadable, starting from empty");
            Ok(StoredBundle {
                bundle: Bundle::new(),
                raw: Some(text),
                recovered: Some(e.to_string()),
            })
        }
    }
}

/// Serialize a bundle: 2-space indent, insertion order, trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_bundle(bundle: &Bundle) -> SyncResult<String> {
    let mut text = serde_json::to_string_pretty(bundle)?;
    text.push('\n');
    Ok(text)
}

/// Write content to a file atomically.
///
/// This function:
/// 1. Writes content to `<file name>.tmp` next to the target
/// 2. Calls `fsync` to ensure data is on disk
/// 3. Atomically renames the temp file to the target path
///
/// If any step fails, the original file (if any) remains untouched.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &str) -> SyncResult<()> {
    let temp_path = sibling_with_suffix(path, ".tmp");

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write to temp file
    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        // Sync to disk before rename
        writer.get_ref().sync_all()?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Copy an unreadable bundle aside to `<file name>.corrupt`.
///
/// Returns the path of the copy.
///
/// # Errors
///
/// Returns an error if the copy cannot be written.
pub fn preserve_corrupt(path: &Path, raw: &str) -> SyncResult<PathBuf> {
    let backup = sibling_with_suffix(path, ".corrupt");
    atomic_write(&backup, raw)?;
    Ok(backup)
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(OsString::new, std::ffi::OsStr::to_os_string);
    name.push(suffix);
    path.with_file_name(name)
}

/// List the bundle files in a language directory, sorted by name.
///
/// Returns an empty list if the directory does not exist.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be listed.
pub fn list_bundle_files(language_dir: &Path) -> SyncResult<Vec<PathBuf>> {
    let entries = match fs::read_dir(language_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Namespace name of a bundle file (`common.json` → `common`).
#[must_use]
pub fn namespace_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
