//! Application wiring and lifecycle management.

mod init;
mod router;
mod state;
mod status;

pub use init::run_relay;
pub use state::AppState;
