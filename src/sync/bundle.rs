//! Translation bundles.
//!
//! A bundle is a JSON object whose values are either terminal translations
//! or nested bundles. Key order follows the source document (serde_json is
//! built with `preserve_order`).
//!
//! Every value is classified exactly once through [`Node::of`]; arrays are
//! terminal and are never descended into.

use std::collections::HashSet;

use serde_json::{Map, Value};

/// A (possibly nested) translation bundle.
pub type Bundle = Map<String, Value>;

/// A bundle value, classified.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A nested bundle (a JSON object).
    Bundle(&'a Bundle),
    /// A leaf: string, number, bool, null or array.
    Terminal(&'a Value),
}

impl<'a> Node<'a> {
    /// Classify a JSON value.
    #[must_use]
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Bundle(map),
            other => Self::Terminal(other),
        }
    }
}

/// Count terminal entries, recursing through nested bundles.
///
/// An array counts as a single leaf; an empty nested bundle counts as zero.
#[must_use]
pub fn count_keys(bundle: &Bundle) -> usize {
    bundle
        .values()
        .map(|value| match Node::of(value) {
            Node::Bundle(nested) => count_keys(nested),
            Node::Terminal(_) => 1,
        })
        .sum()
}

/// Key paths of every terminal entry, in document order.
///
/// Paths are kept as segment lists so keys that themselves contain dots
/// stay unambiguous.
#[must_use]
pub fn leaf_paths(bundle: &Bundle) -> Vec<Vec<&str>> {
    let mut paths = Vec::new();
    collect_leaf_paths(bundle, &mut Vec::new(), &mut paths);
    paths
}

fn collect_leaf_paths<'a>(bundle: &'a Bundle, prefix: &mut Vec<&'a str>, out: &mut Vec<Vec<&'a str>>) {
    for (key, value) in bundle {
        prefix.push(key.as_str());
        match Node::of(value) {
            Node::Bundle(nested) => collect_leaf_paths(nested, prefix, out),
            Node::Terminal(_) => out.push(prefix.clone()),
        }
        prefix.pop();
    }
}

/// Number of terminal paths in `after` that do not exist in `before`.
#[must_use]
pub fn new_leaf_count(before: &Bundle, after: &Bundle) -> usize {
    let known: HashSet<Vec<&str>> = leaf_paths(before).into_iter().collect();
    leaf_paths(after)
        .into_iter()
        .filter(|path| !known.contains(path))
        .count()
}

/// Resolve a dot-delimited key path such as `players.pdf.pdfDocument`.
///
/// Walks nested bundles segment by segment. If the walk fails, a flat key
/// literally named `key_path` is tried. Returns whatever value sits at the
/// path, terminal or not.
#[must_use]
pub fn lookup<'a>(bundle: &'a Bundle, key_path: &str) -> Option<&'a Value> {
    let mut segments = key_path.split('.');
    let first = segments.next()?;
    let mut current = bundle.get(first);

    for segment in segments {
        current = match current.map(Node::of) {
            Some(Node::Bundle(nested)) => nested.get(segment),
            _ => None,
        };
    }

    current.or_else(|| bundle.get(key_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: Value) -> Bundle {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_node_classification() {
        assert!(matches!(Node::of(&json!({"a": 1})), Node::Bundle(_)));
        assert!(matches!(Node::of(&json!("hi")), Node::Terminal(_)));
        assert!(matches!(Node::of(&json!([1, 2])), Node::Terminal(_)));
        assert!(matches!(Node::of(&Value::Null), Node::Terminal(_)));
        assert!(matches!(Node::of(&json!(3)), Node::Terminal(_)));
    }

    #[test]
    fn test_count_keys_nested() {
        let b = bundle(json!({"a": 1, "b": {"c": 2, "d": 3}}));
        assert_eq!(count_keys(&b), 3);
    }

    #[test]
    fn test_count_keys_array_is_one_leaf() {
        let b = bundle(json!({"a": [1, 2, 3]}));
        assert_eq!(count_keys(&b), 1);
    }

    #[test]
    fn test_count_keys_empty_nested_bundle() {
        let b = bundle(json!({"a": {}, "b": null}));
        assert_eq!(count_keys(&b), 1);
        assert_eq!(count_keys(&Bundle::new()), 0);
    }

    #[test]
    fn test_leaf_paths_keep_dotted_keys_distinct() {
        let b = bundle(json!({"a.b": "flat", "a": {"b": "nested"}}));
        let paths = leaf_paths(&b);
        assert_eq!(paths, vec![vec!["a.b"], vec!["a", "b"]]);
    }

    #[test]
    fn test_new_leaf_count() {
        let before = bundle(json!({"hello": "Hello", "bye": "Bye"}));
        let after = bundle(json!({"hello": "Hi", "bye": "Bye"}));
        assert_eq!(new_leaf_count(&before, &after), 0);

        let after = bundle(json!({"hello": "Hi", "bye": "Bye", "menu": {"open": "Open"}}));
        assert_eq!(new_leaf_count(&before, &after), 1);
    }

    #[test]
    fn test_lookup_nested_path() {
        let b = bundle(json!({"players": {"pdf": {"pdfDocument": "PDF document"}}}));
        assert_eq!(
            lookup(&b, "players.pdf.pdfDocument"),
            Some(&json!("PDF document"))
        );
        assert!(matches!(lookup(&b, "players.pdf").map(Node::of), Some(Node::Bundle(_))));
        assert_eq!(lookup(&b, "players.video"), None);
        assert_eq!(lookup(&b, "players.pdf.pdfDocument.extra"), None);
    }

    #[test]
    fn test_lookup_flat_dotted_key() {
        let b = bundle(json!({"units.count": "{{count}} units"}));
        assert_eq!(lookup(&b, "units.count"), Some(&json!("{{count}} units")));
    }
}
