//! Recursive bundle merge.
//!
//! Incoming values win for every key they carry; keys that exist only
//! locally are kept where they are. Nested bundles merge key by key,
//! terminals (including arrays) replace wholesale.

use serde_json::Value;

use crate::sync::bundle::{Bundle, Node};

/// Merge `incoming` on top of `existing`.
///
/// - Nested bundle in `incoming`: merged recursively with the existing value
///   at that key, or with an empty bundle when the existing value is absent
///   or terminal.
/// - Terminal in `incoming`: overwrites the existing value.
/// - Keys only in `existing`: preserved in their original position.
///
/// New keys are appended after the existing ones, in incoming order.
#[must_use]
pub fn merge(existing: &Bundle, incoming: &Bundle) -> Bundle {
    let mut merged = existing.clone();

    for (key, value) in incoming {
        let next = match Node::of(value) {
            Node::Bundle(nested) => {
                let combined = match merged.get(key).map(Node::of) {
                    Some(Node::Bundle(current)) => merge(current, nested),
                    Some(Node::Terminal(_)) | None => merge(&Bundle::new(), nested),
                };
                Value::Object(combined)
            }
            Node::Terminal(terminal) => terminal.clone(),
        };
        merged.insert(key.clone(), next);
    }

    merged
}
