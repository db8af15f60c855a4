//! The alarm-profile document.

use crate::validator::is_acceptable;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Wire key of the selected profile name.
pub const FIELD_ACTIVE_PROFILE: &str = "currentProfile";
/// Wire key of the display sort preference.
pub const FIELD_SORT_ORDER: &str = "sortOrder";
/// Wire key of the informational last-modified label.
pub const FIELD_LAST_MODIFIED: &str = "lastModified";
/// Wire key of the profile mapping.
pub const FIELD_PROFILES: &str = "profiles";

/// Profile selected in a fresh document.
pub const DEFAULT_PROFILE_NAME: &str = "Default";
/// Sort order of a fresh document.
pub const DEFAULT_SORT_ORDER: &str = "earliest";
/// Last-modified label of a fresh document.
pub const INITIAL_LAST_MODIFIED: &str = "Initial";

/// A whole alarm-profile document.
///
/// The document is kept as the JSON value the client sent. Only `profiles`
/// is guaranteed to be a mapping; every other field is carried through
/// untouched, whatever its type. Accessors therefore return `Option`s.
///
/// There is no `Deserialize` impl: the only way to build a document from
/// untrusted input is [`Document::from_candidate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    /// Accept `candidate` if it passes [`is_acceptable`].
    pub fn from_candidate(candidate: Value) -> Option<Self> {
        if is_acceptable(&candidate) {
            Some(Self(candidate))
        } else {
            None
        }
    }

    /// Name of the currently selected profile.
    pub fn active_profile_name(&self) -> Option<&str> {
        self.0.get(FIELD_ACTIVE_PROFILE).and_then(Value::as_str)
    }

    /// Display sort preference.
    pub fn sort_order(&self) -> Option<&str> {
        self.0.get(FIELD_SORT_ORDER).and_then(Value::as_str)
    }

    /// Free-text label; never used for ordering.
    pub fn last_modified_label(&self) -> Option<&str> {
        self.0.get(FIELD_LAST_MODIFIED).and_then(Value::as_str)
    }

    /// Profile name to alarm entries.
    pub fn profiles(&self) -> Option<&Map<String, Value>> {
        self.0.get(FIELD_PROFILES).and_then(Value::as_object)
    }

    /// Number of profiles.
    pub fn profile_count(&self) -> usize {
        self.profiles().map_or(0, Map::len)
    }

    /// Alarm entries of one profile, if that profile holds a sequence.
    pub fn profile_entries(&self, name: &str) -> Option<&[Value]> {
        self.profiles()?
            .get(name)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Compact JSON text, as pushed to the backup endpoint.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }
}

impl Default for Document {
    /// One empty "Default" profile, selected, sorted earliest first.
    fn default() -> Self {
        Self(json!({
            FIELD_ACTIVE_PROFILE: DEFAULT_PROFILE_NAME,
            FIELD_SORT_ORDER: DEFAULT_SORT_ORDER,
            FIELD_LAST_MODIFIED: INITIAL_LAST_MODIFIED,
            FIELD_PROFILES: { DEFAULT_PROFILE_NAME: [] },
        }))
    }
}

impl TryFrom<Value> for Document {
    type Error = Value;

    /// Hands the rejected value back on failure.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if is_acceptable(&value) {
            Ok(Self(value))
        } else {
            Err(value)
        }
    }
}
