//! Real-time synchronization hub for the shared alarm-profile document.
//!
//! Clients connect over WebSocket, receive the current document and the
//! sound catalog, and submit whole-document updates. Every accepted update
//! replaces the stored document, is broadcast to all connected clients
//! (the sender included) and is handed to a [`profile_document::DocumentSink`]
//! for backup.
//!
//! ```text
//! ┌────────┐ update-data  ┌─────────┐ sync-update ┌──────────────┐
//! │ client │ ───────────▶ │ SyncHub │ ──────────▶ │ every client │
//! └────────┘              └────┬────┘             └──────────────┘
//!                              │ document_replaced
//!                              ▼
//!                        DocumentSink
//! ```

mod error;
mod hub;
mod protocol;
mod server;
mod sounds;

pub use error::{HubError, HubResult};
pub use hub::{
    HubStatus, Session, SessionHandle, SessionId, SessionInbox, SyncHub, UpdateOutcome,
};
pub use protocol::{ClientMessage, ServerMessage, SoundOption};
pub use server::{serve_session, ws_handler, ws_router, WS_PATH};
pub use sounds::SoundCatalog;
