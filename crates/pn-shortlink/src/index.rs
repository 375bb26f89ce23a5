//! Bidirectional id/notation index

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Id → notation and notation → id maps, persisted as one JSON blob
///
/// ```json
/// {"idToNotation": {"aZ09bY18": "PN:v1/96/"}, "notationToId": {"PN:v1/96/": "aZ09bY18"}}
/// ```
///
/// Missing keys deserialize as empty maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkIndex {
    #[serde(default)]
    id_to_notation: HashMap<String, String>,
    #[serde(default)]
    notation_to_id: HashMap<String, String>,
}

impl LinkIndex {
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notation stored under `id`
    #[inline]
    #[must_use]
    pub fn notation(&self, id: &str) -> Option<&str> {
        self.id_to_notation.get(id).map(String::as_str)
    }

    /// Id already assigned to `notation`
    #[inline]
    #[must_use]
    pub fn id_for(&self, notation: &str) -> Option<&str> {
        self.notation_to_id.get(notation).map(String::as_str)
    }

    /// Whether `id` is taken
    #[inline]
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.id_to_notation.contains_key(id)
    }

    /// Record a link in both directions
    pub fn insert(&mut self, id: impl Into<String>, notation: impl Into<String>) {
        let id = id.into();
        let notation = notation.into();
        self.notation_to_id.insert(notation.clone(), id.clone());
        self.id_to_notation.insert(id, notation);
    }

    /// Number of stored ids
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_notation.len()
    }

    /// Whether no links are stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_notation.is_empty()
    }

    /// Iterate `(id, notation)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.id_to_notation
            .iter()
            .map(|(id, notation)| (id.as_str(), notation.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_both_directions() {
        let mut index = LinkIndex::new();
        index.insert("abc12345", "PN:v1/96/");
        assert_eq!(index.notation("abc12345"), Some("PN:v1/96/"));
        assert_eq!(index.id_for("PN:v1/96/"), Some("abc12345"));
        assert!(index.contains_id("abc12345"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn json_layout() {
        let mut index = LinkIndex::new();
        index.insert("abc12345", "PN:v1/6/");
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(
            json,
            r#"{"idToNotation":{"abc12345":"PN:v1/6/"},"notationToId":{"PN:v1/6/":"abc12345"}}"#
        );
    }

    #[test]
    fn missing_keys_default_empty() {
        let index: LinkIndex = serde_json::from_str("{}").unwrap();
        assert!(index.is_empty());

        let index: LinkIndex =
            serde_json::from_str(r#"{"idToNotation":{"x":"PN:v1/6/"}}"#).unwrap();
        assert_eq!(index.notation("x"), Some("PN:v1/6/"));
        assert_eq!(index.id_for("PN:v1/6/"), None);
    }
}
