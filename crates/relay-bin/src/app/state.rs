//! Relay state definition.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use sync_hub::SyncHub;

/// Shared state for the HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub hub: Arc<SyncHub>,
    /// When the relay started, shown on the status page.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(hub: Arc<SyncHub>) -> Self {
        Self {
            hub,
            started_at: Utc::now(),
        }
    }
}
