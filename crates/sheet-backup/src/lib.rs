//! Best-effort backup of the shared document.
//!
//! The backup endpoint is a soft durability aid, not a source of truth. It
//! is read once at startup and written after every accepted update.
//!
//! ```text
//! startup:      GET  <endpoint> ──(timeout)──> Option<Document>
//! steady state: SyncHub → SheetBackupSink → spawn(POST <endpoint>)
//! ```
//!
//! # Failure policy
//!
//! - **Startup**: any failure yields `None`; the caller keeps its default.
//! - **Push**: fire-and-forget, bounded by a per-request timeout. Failures
//!   are logged and dropped. There is no retry and no queue; the next
//!   accepted update pushes the then-current document.
//! - Nothing here ever reaches a client session.

mod client;
mod error;
mod sink;

pub use client::{BackupClient, BACKUP_CONTENT_TYPE, DEFAULT_PUSH_TIMEOUT};
pub use error::{BackupError, BackupResult};
pub use sink::SheetBackupSink;
