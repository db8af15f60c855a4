//! Fire-and-forget backup sink.

use crate::client::BackupClient;
use profile_document::{Document, DocumentSink};
use tokio::task::JoinHandle;
use tracing::error;

/// A [`DocumentSink`] that pushes every accepted document to the backup
/// endpoint on a detached task.
///
/// Pushes are independent: a slow or failed push never holds up the next
/// one, and pushes are not ordered against each other.
pub struct SheetBackupSink {
    client: BackupClient,
    /// Runtime the push tasks are spawned on. Captured so the sink can be
    /// called from synchronous code.
    runtime: tokio::runtime::Handle,
}

impl SheetBackupSink {
    pub fn new(client: BackupClient, runtime: tokio::runtime::Handle) -> Self {
        Self { client, runtime }
    }

    /// Start pushing `document` in the background.
    ///
    /// The returned handle may be dropped; the task keeps running. Its
    /// outcome is only ever logged.
    pub fn push_async(&self, document: Document) -> JoinHandle<()> {
        let client = self.client.clone();

        self.runtime.spawn(async move {
            if let Err(e) = client.push(&document).await {
                error!(
                    endpoint = %client.endpoint(),
                    error = %e,
                    "Backup push failed"
                );
            }
        })
    }
}

impl std::fmt::Debug for SheetBackupSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetBackupSink")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl DocumentSink for SheetBackupSink {
    fn document_replaced(&self, document: Document) {
        drop(self.push_async(document));
    }
}
