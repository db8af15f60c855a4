//! Where accepted documents go after they replace the shared copy.
//!
//! The hub calls [`DocumentSink::document_replaced`] once per accepted
//! update, after the broadcast has been queued. Implementations must return
//! immediately; anything slow (network I/O) belongs on a background task.

use crate::Document;
use parking_lot::Mutex;

/// Receiver for accepted documents.
pub trait DocumentSink: Send + Sync {
    /// Called with the document that was just stored.
    fn document_replaced(&self, document: Document);
}

/// Discards every document. Used when no backup endpoint is configured.
#[derive(Debug, Default)]
pub struct NullSink;

impl DocumentSink for NullSink {
    fn document_replaced(&self, _document: Document) {}
}

/// Records every document, for tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    documents: Mutex<Vec<Document>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All documents received so far, oldest first.
    pub fn documents(&self) -> Vec<Document> {
        self.documents.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.documents.lock().clear();
    }
}

impl DocumentSink for RecordingSink {
    fn document_replaced(&self, document: Document) {
        self.documents.lock().push(document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        let a = Document::from_candidate(json!({ "profiles": { "A": [] } })).unwrap();
        let b = Document::from_candidate(json!({ "profiles": { "B": [] } })).unwrap();
        sink.document_replaced(a.clone());
        sink.document_replaced(b.clone());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.documents(), vec![a, b]);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn null_sink_accepts_anything() {
        let sink: Box<dyn DocumentSink> = Box::new(NullSink);
        sink.document_replaced(Document::default());
    }
}
