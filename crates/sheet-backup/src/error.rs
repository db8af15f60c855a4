//! Error types for backup operations.
//!
//! None of these leave the crate's public async methods in the steady-state
//! path: [`crate::SheetBackupSink`] logs and discards them.

use std::time::Duration;
use thiserror::Error;

/// Failure talking to the backup endpoint.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Network or transport-level error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint did not answer before the deadline.
    #[error("Backup endpoint timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-success status.
    #[error("Backup endpoint error: {status} - {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for debugging.
        message: String,
    },

    /// Body was not JSON, or the document could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Body parsed but carried no `profiles` mapping.
    #[error("Backup payload has no profiles mapping")]
    MissingProfiles,
}

/// Result type alias for backup operations.
pub type BackupResult<T> = Result<T, BackupError>;
