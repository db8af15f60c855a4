//! Acceptance check for incoming documents.
//!
//! The check is deliberately minimal: a candidate is accepted when it is an
//! object whose `profiles` field is itself an object. Nothing else is looked
//! at. A candidate with a missing `currentProfile` or a numeric `sortOrder`
//! is accepted and stored as sent. Tightening this would start rejecting
//! documents that clients already rely on being accepted.

use crate::document::FIELD_PROFILES;
use serde_json::Value;

/// Whether `candidate` may replace the shared document.
pub fn is_acceptable(candidate: &Value) -> bool {
    candidate
        .get(FIELD_PROFILES)
        .is_some_and(Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_profiles_mapping() {
        assert!(is_acceptable(&json!({ "profiles": {} })));
        assert!(is_acceptable(&json!({ "profiles": { "A": [] } })));
        assert!(is_acceptable(&json!({
            "currentProfile": "A",
            "sortOrder": "latest",
            "lastModified": "Tue 09:12",
            "profiles": { "A": [{ "time": "06:00" }], "B": [] }
        })));
    }

    #[test]
    fn ignores_other_fields_entirely() {
        assert!(is_acceptable(&json!({
            "profiles": {},
            "currentProfile": null,
            "sortOrder": 7,
            "lastModified": ["not", "text"]
        })));
        assert!(is_acceptable(&json!({ "profiles": { "A": "not a list" } })));
    }

    #[test]
    fn rejects_missing_profiles() {
        assert!(!is_acceptable(&json!({})));
        assert!(!is_acceptable(&json!({ "currentProfile": "X" })));
    }

    #[test]
    fn rejects_non_mapping_profiles() {
        assert!(!is_acceptable(&json!({ "profiles": null })));
        assert!(!is_acceptable(&json!({ "profiles": [] })));
        assert!(!is_acceptable(&json!({ "profiles": "A" })));
        assert!(!is_acceptable(&json!({ "profiles": 1 })));
        assert!(!is_acceptable(&json!({ "profiles": true })));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(!is_acceptable(&Value::Null));
        assert!(!is_acceptable(&json!("profiles")));
        assert!(!is_acceptable(&json!([{ "profiles": {} }])));
        assert!(!is_acceptable(&json!(3)));
    }
}
