//! Relay initialization.

use crate::app::router::{build_router, SOUNDS_URL_PREFIX};
use crate::app::AppState;
use profile_document::{Document, DocumentSink, NullSink};
use relay_config_and_utils::Config;
use sheet_backup::{BackupClient, SheetBackupSink};
use std::sync::Arc;
use sync_hub::{SoundCatalog, SyncHub};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Run the relay until ctrl-c.
pub async fn run_relay(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting alarm sync relay");

    info!(
        port = config.port,
        host = %config.bind_host,
        backup = config.backup_url.is_some(),
        public_dir = %config.public_dir.display(),
        sounds_dir = %config.sounds_dir().display(),
        "Configuration loaded"
    );

    let addr = config.socket_addr()?;
    let hub = build_hub(&config).await?;
    let app = build_router(AppState::new(hub), &config.public_dir, &config.sounds_dir());

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay stopped");
    Ok(())
}

/// Restore the document from backup (if configured) and assemble the hub.
///
/// A failed restore is not an error; the hub starts from the default
/// document. An unusable backup URL is.
async fn build_hub(config: &Config) -> Result<Arc<SyncHub>, Box<dyn std::error::Error>> {
    let (initial, sink): (Document, Arc<dyn DocumentSink>) = match config.backup_url()? {
        Some(endpoint) => {
            let client = BackupClient::new(endpoint, config.backup_timeout())?;
            let initial = client.load_on_startup().await.unwrap_or_default();
            let sink = SheetBackupSink::new(client, tokio::runtime::Handle::current());
            (initial, Arc::new(sink))
        }
        None => {
            warn!("No backup URL configured, documents will not be persisted");
            (Document::default(), Arc::new(NullSink))
        }
    };

    info!(profiles = initial.profile_count(), "Document ready");

    let sounds = SoundCatalog::with_builtin(config.sounds_dir(), SOUNDS_URL_PREFIX);
    Ok(Arc::new(SyncHub::new(initial, sink, Some(sounds))))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal, exiting..."),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn backup_stub() -> String {
        let app = Router::new().route(
            "/exec",
            get(|| async { Json(json!({ "currentProfile": "A", "profiles": { "A": [] } })) }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/exec", addr)
    }

    #[tokio::test]
    async fn starts_from_default_without_backup() {
        let config = Config {
            backup_url: None,
            ..Config::default()
        };
        let hub = build_hub(&config).await.unwrap();
        assert_eq!(hub.snapshot(), Document::default());
    }

    #[tokio::test]
    async fn restores_document_from_backup() {
        let config = Config {
            backup_url: Some(backup_stub().await),
            ..Config::default()
        };
        let hub = build_hub(&config).await.unwrap();
        assert_eq!(
            hub.snapshot().into_value(),
            json!({ "currentProfile": "A", "profiles": { "A": [] } })
        );
    }

    #[tokio::test]
    async fn unreachable_backup_falls_back_to_default() {
        let config = Config {
            backup_url: Some("http://127.0.0.1:9/exec".to_string()),
            backup_timeout_secs: 1,
            ..Config::default()
        };
        let hub = build_hub(&config).await.unwrap();
        assert_eq!(hub.snapshot(), Document::default());
    }

    #[tokio::test]
    async fn rejects_unusable_backup_url() {
        let config = Config {
            backup_url: Some("ftp://backup.example.com".to_string()),
            ..Config::default()
        };
        assert!(build_hub(&config).await.is_err());
    }
}
