//! HTTP surface: status routes, the WebSocket endpoint and static files.

use crate::app::status::{health, status_page};
use crate::app::AppState;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// URL path the sounds directory is served under.
pub const SOUNDS_URL_PREFIX: &str = "/sounds";

/// Build the full router.
///
/// # Arguments
/// * `state` - shared relay state
/// * `public_dir` - served for any path not matched by a route
/// * `sounds_dir` - served under [`SOUNDS_URL_PREFIX`]
pub fn build_router(state: AppState, public_dir: &Path, sounds_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .route("/", get(status_page))
        .route("/health", get(health))
        .with_state(state.clone())
        .merge(sync_hub::ws_router(state.hub))
        .nest_service(SOUNDS_URL_PREFIX, ServeDir::new(sounds_dir))
        .fallback_service(ServeDir::new(public_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
