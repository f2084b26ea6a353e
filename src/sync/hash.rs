//! Bundle fingerprints.
//!
//! The writer compares the fingerprint of the freshly rendered bundle with
//! the fingerprint of the text it read, and the reconciliation scan records
//! one per file on disk.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA256 of rendered bundle text.
#[must_use]
pub fn content_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// Whether `rendered` differs from what was on disk.
///
/// Nothing on disk (`None`) always counts as a change.
#[must_use]
pub fn has_changed(rendered: &str, on_disk: Option<&str>) -> bool {
    on_disk.is_none_or(|hash| hash != rendered)
}
