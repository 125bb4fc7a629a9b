//! Core annotation types
//!
//! An annotation session owns a document, a growing label set, at most one
//! pending selection, and an append-only annotation log. The types here are
//! the vocabulary shared by the store, the routes, and the persistence layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selection::SelectionEvent;

/// A confirmed, labeled span of the document.
///
/// `start`/`end` are half-open character offsets into the document the
/// annotation was made against. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// The annotated substring
    pub text: String,
    /// Character offset of the first selected character
    pub start: usize,
    /// Character offset one past the last selected character
    pub end: usize,
    /// Entity label assigned at confirmation time
    pub label: String,
}

/// An unconfirmed selection awaiting a label.
///
/// Holds the same span data as an [`Annotation`] minus the label. A session
/// has at most one of these at a time; a new selection replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSelection {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl From<SelectionEvent> for PendingSelection {
    fn from(event: SelectionEvent) -> Self {
        Self {
            text: event.text,
            start: event.start,
            end: event.end,
        }
    }
}

/// Ordered set of entity labels available for assignment.
///
/// Labels are unique (case-sensitive exact match), append-only, and keep
/// insertion order. The set lives for the session and is never persisted.
#[derive(Debug, Clone)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Create a label set from seed labels, dropping duplicates and blanks.
    pub fn seeded<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { labels: Vec::new() };
        for label in seed {
            let label = label.as_ref().trim();
            if !label.is_empty() {
                set.add(label);
            }
        }
        set
    }

    /// Append a label if it is not already present. Returns whether the
    /// label was appended.
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.labels.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Read-only view of a session's state, taken under one lock acquisition.
/// Used by the page renderer.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub document: String,
    pub labels: Vec<String>,
    pub pending: Option<PendingSelection>,
    pub annotations: Vec<Annotation>,
}

/// Errors from annotation store operations.
///
/// Every variant is a validation failure: the operation is rejected and the
/// store is left unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("selection does not match the current document")]
    StaleSelection,

    #[error("'{0}' is already annotated")]
    DuplicateSelection(String),

    #[error("no selection is pending")]
    NoPendingSelection,

    #[error("unknown label '{0}'")]
    UnknownLabel(String),

    #[error("label must not be empty")]
    EmptyLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_key_order() {
        let annotation = Annotation {
            text: "SKU123".to_string(),
            start: 6,
            end: 12,
            label: "SKU".to_string(),
        };

        let json = serde_json::to_string_pretty(&annotation).unwrap();
        let text_pos = json.find("\"text\"").unwrap();
        let start_pos = json.find("\"start\"").unwrap();
        let end_pos = json.find("\"end\"").unwrap();
        let label_pos = json.find("\"label\"").unwrap();
        assert!(text_pos < start_pos && start_pos < end_pos && end_pos < label_pos);

        // Round-trip preserves every field
        let parsed: Annotation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, annotation);
    }

    #[test]
    fn test_label_set_seeded_dedups() {
        let set = LabelSet::seeded(["SKU", "PERSON", "SKU", "  ", ""]);
        assert_eq!(set.as_slice(), ["SKU", "PERSON"]);
    }

    #[test]
    fn test_label_set_add_is_idempotent() {
        let mut set = LabelSet::seeded(["SKU"]);
        assert!(set.add("PERSON"));
        assert!(!set.add("PERSON"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), ["SKU", "PERSON"]);
    }

    #[test]
    fn test_label_set_is_case_sensitive() {
        let mut set = LabelSet::seeded(["SKU"]);
        assert!(set.add("sku"));
        assert_eq!(set.len(), 2);
    }
}
