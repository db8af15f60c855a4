//! Hub error types.

use thiserror::Error;

/// Errors on the WebSocket transport.
///
/// These end a single session. They never reach the hub's shared state or
/// any other session.
#[derive(Error, Debug)]
pub enum HubError {
    /// Outbound message could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket read or write failed.
    #[error("Transport error: {0}")]
    Transport(#[from] axum::Error),
}

/// Result type alias using HubError.
pub type HubResult<T> = Result<T, HubError>;
