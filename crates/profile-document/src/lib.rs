//! The shared alarm-profile document.
//!
//! This crate holds the pieces every other crate agrees on:
//!
//! - [`Document`]: the whole-document JSON value clients edit
//! - [`is_acceptable`]: the single gate an incoming update has to pass
//! - [`DocumentStore`]: the one in-memory copy, replaced wholesale
//! - [`DocumentSink`]: where accepted documents are handed after a replace
//!
//! ```text
//! client update → is_acceptable → DocumentStore::replace → DocumentSink
//! ```

mod document;
mod sink;
mod store;
mod validator;

pub use document::{
    Document, DEFAULT_PROFILE_NAME, DEFAULT_SORT_ORDER, FIELD_ACTIVE_PROFILE, FIELD_LAST_MODIFIED,
    FIELD_PROFILES, FIELD_SORT_ORDER, INITIAL_LAST_MODIFIED,
};
pub use sink::{DocumentSink, NullSink, RecordingSink};
pub use store::DocumentStore;
pub use validator::is_acceptable;
