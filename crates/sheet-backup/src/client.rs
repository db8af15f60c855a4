//! HTTP client for the backup endpoint.

use crate::error::{BackupError, BackupResult};
use profile_document::Document;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Content type declared on pushes. The body is JSON, but spreadsheet
/// script endpoints only read raw bodies declared as plain text.
pub const BACKUP_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Bound on establishing a connection for any request.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on a whole push, so a silent endpoint cannot pin tasks forever.
pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for one backup endpoint.
#[derive(Clone)]
pub struct BackupClient {
    http_client: reqwest::Client,
    endpoint: Url,
    fetch_timeout: Duration,
    push_timeout: Duration,
}

impl BackupClient {
    /// Create a client for `endpoint`.
    ///
    /// # Arguments
    /// * `endpoint` - URL answering GET with the stored document and accepting POSTs
    /// * `fetch_timeout` - deadline for the startup fetch
    pub fn new(endpoint: Url, fetch_timeout: Duration) -> BackupResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            endpoint,
            fetch_timeout,
            push_timeout: DEFAULT_PUSH_TIMEOUT,
        })
    }

    /// Override the deadline applied to each push.
    pub fn with_push_timeout(mut self, push_timeout: Duration) -> Self {
        self.push_timeout = push_timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn push_timeout(&self) -> Duration {
        self.push_timeout
    }

    /// Fetch the stored document.
    ///
    /// The whole exchange, body included, is abandoned once the fetch
    /// timeout elapses.
    pub async fn fetch(&self) -> BackupResult<Document> {
        let response = self
            .http_client
            .get(self.endpoint.clone())
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| classify(e, self.fetch_timeout))?;

        let response = check_response(response).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| classify(e, self.fetch_timeout))?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;

        Document::from_candidate(value).ok_or(BackupError::MissingProfiles)
    }

    /// Fetch the stored document, or `None` on any failure.
    ///
    /// Failure is expected (first run, endpoint down) and only logged.
    pub async fn load_on_startup(&self) -> Option<Document> {
        info!(endpoint = %self.endpoint, "Fetching backup");

        match self.fetch().await {
            Ok(document) => {
                info!(
                    profiles = document.profile_count(),
                    "Document restored from backup"
                );
                Some(document)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load backup, starting with default document");
                None
            }
        }
    }

    /// POST the full document.
    pub async fn push(&self, document: &Document) -> BackupResult<()> {
        let body = document.to_json_string()?;

        debug!(bytes = body.len(), "Saving document to backup");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, BACKUP_CONTENT_TYPE)
            .body(body)
            .timeout(self.push_timeout)
            .send()
            .await
            .map_err(|e| classify(e, self.push_timeout))?;

        check_response(response).await?;

        debug!("Document saved to backup");
        Ok(())
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> BackupError {
    if error.is_timeout() {
        BackupError::Timeout(timeout)
    } else {
        BackupError::Http(error)
    }
}

/// Turn a non-success status into [`BackupError::Status`].
async fn check_response(response: reqwest::Response) -> BackupResult<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(BackupError::Status { status, message });
    }
    Ok(response)
}

impl std::fmt::Debug for BackupClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackupClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("fetch_timeout", &self.fetch_timeout)
            .field("push_timeout", &self.push_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let endpoint = Url::parse("https://backup.example.com/exec").unwrap();
        let client = BackupClient::new(endpoint.clone(), Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint(), &endpoint);
        assert_eq!(client.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(client.push_timeout(), DEFAULT_PUSH_TIMEOUT);

        let client = client.with_push_timeout(Duration::from_secs(1));
        assert_eq!(client.push_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_debug_hides_http_client() {
        let endpoint = Url::parse("https://backup.example.com/exec").unwrap();
        let client = BackupClient::new(endpoint, Duration::from_secs(5)).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("backup.example.com"));
        assert!(!debug.contains("http_client"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_none() {
        // Port 9 (discard) on localhost is closed on any sane test host.
        let endpoint = Url::parse("http://127.0.0.1:9/").unwrap();
        let client = BackupClient::new(endpoint, Duration::from_millis(500)).unwrap();
        assert!(client.load_on_startup().await.is_none());
    }
}
