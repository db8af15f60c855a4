//! Session registry and broadcast hub.
//!
//! The hub owns the only [`DocumentStore`] and the map of connected sessions
//! behind a single lock. Every accepted update is stored and fanned out while
//! that lock is held, so all sessions see updates in the same order the store
//! applied them.

use crate::protocol::ServerMessage;
use crate::sounds::SoundCatalog;
use parking_lot::Mutex;
use profile_document::{Document, DocumentSink, DocumentStore};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Unique identifier for a connected session (UUID string).
///
/// Fresh ids are random; an id cannot be built from an arbitrary string:
///
/// ```compile_fail
/// let forged = sync_hub::SessionId("not-a-session".to_string());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the session ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of [`SyncHub::apply_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Stored and queued to `recipients` sessions, sender included.
    Applied { recipients: usize },
    /// Failed validation or came from an unknown session. Nothing changed.
    Rejected,
}

/// Counters for the status page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubStatus {
    pub profile_count: usize,
    pub session_count: usize,
}

type Outbound = mpsc::UnboundedSender<Arc<ServerMessage>>;

struct HubState {
    store: DocumentStore,
    sessions: HashMap<SessionId, Outbound>,
}

/// Shared document plus every connected session.
pub struct SyncHub {
    state: Mutex<HubState>,
    sink: Arc<dyn DocumentSink>,
    sounds: Option<SoundCatalog>,
}

impl SyncHub {
    /// Create a hub holding `initial`.
    ///
    /// # Arguments
    /// * `initial` - starting document (restored backup or the default)
    /// * `sink` - receives every accepted document
    /// * `sounds` - catalog announced to each new session, if any
    pub fn new(
        initial: Document,
        sink: Arc<dyn DocumentSink>,
        sounds: Option<SoundCatalog>,
    ) -> Self {
        Self {
            state: Mutex::new(HubState {
                store: DocumentStore::new(initial),
                sessions: HashMap::new(),
            }),
            sink,
            sounds,
        }
    }

    /// Register a new session and queue its initial messages.
    ///
    /// The session's queue starts with `init-data` and, when a sound
    /// catalog is configured, `sounds-list`. No broadcast can slip in
    /// ahead of `init-data`.
    pub fn connect(self: &Arc<Self>) -> Session {
        // Directory scan happens outside the lock.
        let sounds = self.sounds.as_ref().map(SoundCatalog::list);

        let id = SessionId::new();
        let (tx, rx) = mpsc::unbounded_channel();

        let session_count = {
            let mut state = self.state.lock();
            let _ = tx.send(Arc::new(ServerMessage::InitData(state.store.get())));
            if let Some(sounds) = sounds {
                let _ = tx.send(Arc::new(ServerMessage::SoundsList(sounds)));
            }
            state.sessions.insert(id.clone(), tx);
            state.sessions.len()
        };

        info!(session_id = %id, sessions = session_count, "Session connected");

        Session {
            handle: SessionHandle {
                id,
                hub: Arc::clone(self),
            },
            inbox: SessionInbox { rx },
        }
    }

    /// Remove a session. Safe to call more than once.
    pub fn disconnect(&self, id: &SessionId) {
        let remaining = {
            let mut state = self.state.lock();
            if state.sessions.remove(id).is_none() {
                return;
            }
            state.sessions.len()
        };

        info!(session_id = %id, sessions = remaining, "Session disconnected");
    }

    /// Validate `candidate` from session `from` and, if acceptable, replace
    /// the document and broadcast it to every session.
    ///
    /// Rejected candidates are dropped without telling the sender.
    pub fn apply_update(&self, from: &SessionId, candidate: Value) -> UpdateOutcome {
        let Some(document) = Document::from_candidate(candidate) else {
            debug!(session_id = %from, "Update rejected: no profiles mapping");
            return UpdateOutcome::Rejected;
        };

        let recipients = {
            let mut state = self.state.lock();
            if !state.sessions.contains_key(from) {
                warn!(session_id = %from, "Update from unknown session ignored");
                return UpdateOutcome::Rejected;
            }

            state.store.replace(document.clone());

            let message = Arc::new(ServerMessage::SyncUpdate(document.clone()));
            state
                .sessions
                .retain(|_, tx| tx.send(Arc::clone(&message)).is_ok());

            // Handed over under the lock so pushes start in store order.
            self.sink.document_replaced(document);

            state.sessions.len()
        };

        debug!(session_id = %from, recipients, "Update applied");
        UpdateOutcome::Applied { recipients }
    }

    /// Copy of the current document.
    pub fn snapshot(&self) -> Document {
        self.state.lock().store.get()
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().sessions.len()
    }

    pub fn status(&self) -> HubStatus {
        let state = self.state.lock();
        HubStatus {
            profile_count: state.store.current().profile_count(),
            session_count: state.sessions.len(),
        }
    }
}

impl std::fmt::Debug for SyncHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncHub")
            .field("status", &self.status())
            .field("sounds", &self.sounds)
            .finish_non_exhaustive()
    }
}

/// One connected client, as returned by [`SyncHub::connect`].
///
/// Dropping it disconnects the session.
#[derive(Debug)]
pub struct Session {
    handle: SessionHandle,
    inbox: SessionInbox,
}

impl Session {
    pub fn id(&self) -> &SessionId {
        self.handle.id()
    }

    /// Submit a candidate document on behalf of this session.
    pub fn submit(&self, candidate: Value) -> UpdateOutcome {
        self.handle.submit(candidate)
    }

    /// Next queued message, or `None` once disconnected and drained.
    pub async fn recv(&mut self) -> Option<Arc<ServerMessage>> {
        self.inbox.recv().await
    }

    /// Next queued message without waiting.
    pub fn try_recv(&mut self) -> Option<Arc<ServerMessage>> {
        self.inbox.try_recv()
    }

    /// Split into the sending half and the receiving half so each can move
    /// to its own task.
    pub fn into_split(self) -> (SessionHandle, SessionInbox) {
        (self.handle, self.inbox)
    }
}

/// Identity of a session plus a way to submit updates. Disconnects on drop.
pub struct SessionHandle {
    id: SessionId,
    hub: Arc<SyncHub>,
}

impl SessionHandle {
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn submit(&self, candidate: Value) -> UpdateOutcome {
        self.hub.apply_update(&self.id, candidate)
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.hub.disconnect(&self.id);
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Outbound queue of a session.
#[derive(Debug)]
pub struct SessionInbox {
    rx: mpsc::UnboundedReceiver<Arc<ServerMessage>>,
}

impl SessionInbox {
    pub async fn recv(&mut self) -> Option<Arc<ServerMessage>> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Arc<ServerMessage>> {
        self.rx.try_recv().ok()
    }
}
