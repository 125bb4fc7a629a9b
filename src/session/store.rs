//! Session-scoped annotation state
//!
//! One store per session: the current document, the label set, at most one
//! pending selection, and the append-only annotation log. Every operation
//! either succeeds or rejects without mutating anything.

use crate::selection;

use super::types::{Annotation, LabelSet, PendingSelection, SessionSnapshot, StoreError};

/// Holds a session's document and annotation state.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    document: String,
    labels: LabelSet,
    pending: Option<PendingSelection>,
    log: Vec<Annotation>,
}

impl AnnotationStore {
    /// Create an empty store seeded with the configured labels.
    pub fn new<I, S>(seed_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            document: String::new(),
            labels: LabelSet::seeded(seed_labels),
            pending: None,
            log: Vec::new(),
        }
    }

    /// Replace the document wholesale.
    ///
    /// Clears any pending selection. The annotation log is kept as-is:
    /// existing annotations may now carry offsets into text that is gone.
    pub fn set_document(&mut self, text: impl Into<String>) {
        self.document = text.into();
        self.pending = None;
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Accept a selection candidate as the pending selection.
    ///
    /// The candidate must slice the current document exactly
    /// (`document[start..end] == text`, character offsets) and its text must
    /// not already be annotated. A valid candidate replaces any prior
    /// pending selection; a rejected one changes nothing, which makes
    /// duplicate delivery of the same selection harmless.
    pub fn receive_selection(&mut self, candidate: PendingSelection) -> Result<(), StoreError> {
        match selection::char_slice(&self.document, candidate.start, candidate.end) {
            Some(slice) if slice == candidate.text => {}
            _ => return Err(StoreError::StaleSelection),
        }

        if self.is_annotated(&candidate.text) {
            return Err(StoreError::DuplicateSelection(candidate.text));
        }

        self.pending = Some(candidate);
        Ok(())
    }

    pub fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    /// Append a label to the label set.
    ///
    /// Returns whether the label was new; appending an existing label is a
    /// no-op. Matching is case-sensitive and exact.
    pub fn add_label(&mut self, name: &str) -> Result<bool, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyLabel);
        }
        Ok(self.labels.add(name))
    }

    pub fn labels(&self) -> &[String] {
        self.labels.as_slice()
    }

    /// Confirm the pending selection under `label`.
    ///
    /// Appends the resulting annotation to the log and clears the pending
    /// selection. Fails without mutating state when no selection is pending
    /// or the label is not in the label set.
    pub fn confirm(&mut self, label: &str) -> Result<Annotation, StoreError> {
        if !self.labels.contains(label) {
            return Err(StoreError::UnknownLabel(label.to_string()));
        }
        let pending = self.pending.take().ok_or(StoreError::NoPendingSelection)?;

        let annotation = Annotation {
            text: pending.text,
            start: pending.start,
            end: pending.end,
            label: label.to_string(),
        };
        self.log.push(annotation.clone());
        Ok(annotation)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.log
    }

    pub fn is_annotated(&self, text: &str) -> bool {
        self.log.iter().any(|a| a.text == text)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            document: self.document.clone(),
            labels: self.labels.as_slice().to_vec(),
            pending: self.pending.clone(),
            annotations: self.log.clone(),
        }
    }
}
