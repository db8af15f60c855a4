//! Configuration, error types, and logging setup for the alarm sync relay.

mod config;
mod error;
mod logging;

pub use config::{
    Config, DEFAULT_BACKUP_TIMEOUT_SECS, DEFAULT_BACKUP_URL, DEFAULT_BIND_HOST, DEFAULT_LOG_LEVEL,
    DEFAULT_PORT, DEFAULT_PUBLIC_DIR,
};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
