//! The single in-memory copy of the document.

use crate::Document;

/// Holds the current document.
///
/// The store does no locking of its own. Its owner keeps it behind one
/// exclusive lock so that a `replace` and the reads that follow it are
/// totally ordered.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    current: Document,
}

impl DocumentStore {
    /// Create a store holding `initial`.
    pub fn new(initial: Document) -> Self {
        Self { current: initial }
    }

    /// A copy of the current document.
    pub fn get(&self) -> Document {
        self.current.clone()
    }

    /// Borrow the current document without cloning it.
    pub fn current(&self) -> &Document {
        &self.current
    }

    /// Overwrite the whole document. No merge, no diff.
    pub fn replace(&mut self, document: Document) {
        self.current = document;
    }
}
