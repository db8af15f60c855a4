//! Wire protocol between the relay and its clients.
//!
//! Every frame is a JSON text frame shaped as an event envelope:
//!
//! ```text
//! {"event": "init-data",   "data": <document>}      server → client, on connect
//! {"event": "sounds-list", "data": [{name, url}..]} server → client, on connect
//! {"event": "sync-update", "data": <document>}      server → every client
//! {"event": "update-data", "data": <candidate>}     client → server
//! ```

use profile_document::Document;
use serde::{Deserialize, Serialize};

/// An alert sound a client can pick for an alarm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundOption {
    pub name: String,
    pub url: String,
}

impl SoundOption {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Messages sent FROM server TO client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Current document, sent once right after connect.
    InitData(Document),
    /// Available alert sounds, sent once right after connect.
    SoundsList(Vec<SoundOption>),
    /// Document after an accepted update, sent to every session.
    SyncUpdate(Document),
}

impl ServerMessage {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Event name on the wire.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::InitData(_) => "init-data",
            Self::SoundsList(_) => "sounds-list",
            Self::SyncUpdate(_) => "sync-update",
        }
    }
}

/// Messages sent FROM client TO server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Candidate replacement for the whole document. Not yet validated.
    UpdateData(serde_json::Value),
}

impl ClientMessage {
    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn init_data_envelope() {
        let json = ServerMessage::InitData(Document::default()).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["event"], "init-data");
        assert_eq!(value["data"]["currentProfile"], "Default");
        assert_eq!(value["data"]["profiles"], json!({ "Default": [] }));
    }

    #[test]
    fn sounds_list_envelope() {
        let message = ServerMessage::SoundsList(vec![SoundOption::new("Bell", "/sounds/bell.mp3")]);
        let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "sounds-list",
                "data": [{ "name": "Bell", "url": "/sounds/bell.mp3" }]
            })
        );
    }

    #[test]
    fn event_names_match_wire() {
        let doc = Document::default();
        for message in [
            ServerMessage::InitData(doc.clone()),
            ServerMessage::SoundsList(Vec::new()),
            ServerMessage::SyncUpdate(doc),
        ] {
            let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
            assert_eq!(value["event"], message.event_name());
        }
    }

    #[test]
    fn update_data_parses_any_payload() {
        let parsed =
            ClientMessage::from_json(r#"{"event":"update-data","data":{"profiles":{}}}"#).unwrap();
        assert_eq!(parsed, ClientMessage::UpdateData(json!({ "profiles": {} })));

        let parsed = ClientMessage::from_json(r#"{"event":"update-data","data":null}"#).unwrap();
        assert_eq!(parsed, ClientMessage::UpdateData(Value::Null));
    }

    #[test]
    fn unknown_event_is_a_parse_error() {
        assert!(ClientMessage::from_json(r#"{"event":"delete-all","data":{}}"#).is_err());
        assert!(ClientMessage::from_json("not json").is_err());
    }
}
