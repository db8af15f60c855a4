//! Status page and health check.

use crate::app::AppState;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

/// `GET /` - human-readable page for uptime checks.
pub async fn status_page(State(state): State<AppState>) -> Html<String> {
    let status = state.hub.status();
    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>Alarm Sync Relay</title></head>\n\
         <body>\n\
         <h1>Server is Running</h1>\n\
         <p>Profiles: {}</p>\n\
         <p>Connected clients: {}</p>\n\
         <p>Up since: {}</p>\n\
         </body>\n\
         </html>\n",
        status.profile_count,
        status.session_count,
        state.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
    ))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let status = state.hub.status();
    Json(json!({
        "status": "ok",
        "profiles": status.profile_count,
        "sessions": status.session_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile_document::{Document, NullSink};
    use std::sync::Arc;
    use sync_hub::SyncHub;

    fn state() -> AppState {
        let initial = Document::from_candidate(json!({ "profiles": { "A": [], "B": [] } })).unwrap();
        AppState::new(Arc::new(SyncHub::new(initial, Arc::new(NullSink), None)))
    }

    #[tokio::test]
    async fn status_page_reports_counts() {
        let state = state();
        let _session = state.hub.connect();

        let Html(body) = status_page(State(state)).await;
        assert!(body.contains("Server is Running"));
        assert!(body.contains("Profiles: 2"));
        assert!(body.contains("Connected clients: 1"));
    }

    #[tokio::test]
    async fn health_reports_counts() {
        let Json(body) = health(State(state())).await;
        assert_eq!(body, json!({ "status": "ok", "profiles": 2, "sessions": 0 }));
    }
}
