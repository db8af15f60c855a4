//! Configuration management for the relay.

use crate::{CoreError, CoreResult};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Backup endpoint baked in at compile time via ALARM_SYNC_BACKUP_URL, if any.
pub const DEFAULT_BACKUP_URL: Option<&str> = option_env!("ALARM_SYNC_BACKUP_URL");

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind host.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Default wait for the startup backup fetch.
pub const DEFAULT_BACKUP_TIMEOUT_SECS: u64 = 5;

/// Default directory for static assets.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Relay configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TCP port for HTTP and WebSocket traffic.
    pub port: u16,
    /// Interface to bind.
    pub bind_host: String,
    /// Backup endpoint. `None` runs the relay without persistence.
    pub backup_url: Option<String>,
    /// Deadline for the startup backup fetch.
    pub backup_timeout_secs: u64,
    /// Directory served as static files.
    pub public_dir: PathBuf,
    /// Directory scanned for alert sounds. Defaults to `<public_dir>/sounds`.
    pub sounds_dir: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format on stderr (compact, json).
    pub log_format: String,
    /// Optional JSONL log file.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_host: DEFAULT_BIND_HOST.to_string(),
            backup_url: DEFAULT_BACKUP_URL.map(|s| s.to_string()),
            backup_timeout_secs: DEFAULT_BACKUP_TIMEOUT_SECS,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            sounds_dir: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: "compact".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load from an optional JSON file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.load_from_env()?;
        Ok(config)
    }

    /// Load configuration from a specific file. Missing keys keep defaults.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn load_from_env(&mut self) -> CoreResult<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(port) = get("PORT") {
            self.port = port
                .parse()
                .map_err(|_| CoreError::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(host) = get("ALARM_SYNC_HOST") {
            self.bind_host = host;
        }
        if let Some(url) = get("ALARM_SYNC_BACKUP_URL") {
            self.backup_url = Some(url);
        }
        if let Some(secs) = get("ALARM_SYNC_BACKUP_TIMEOUT_SECS") {
            self.backup_timeout_secs = secs.parse().map_err(|_| {
                CoreError::Config(format!(
                    "ALARM_SYNC_BACKUP_TIMEOUT_SECS is not a number: {}",
                    secs
                ))
            })?;
        }
        if let Some(dir) = get("ALARM_SYNC_PUBLIC_DIR") {
            self.public_dir = PathBuf::from(dir);
        }
        if let Some(dir) = get("ALARM_SYNC_SOUNDS_DIR") {
            self.sounds_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = get("ALARM_SYNC_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(format) = get("ALARM_SYNC_LOG_FORMAT") {
            self.log_format = format;
        }
        if let Some(file) = get("ALARM_SYNC_LOG_FILE") {
            self.log_file = Some(PathBuf::from(file));
        }
        Ok(())
    }

    /// The backup endpoint as a parsed URL, if one is configured.
    pub fn backup_url(&self) -> CoreResult<Option<Url>> {
        match self.backup_url.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => {
                let url = Url::parse(raw)?;
                match url.scheme() {
                    "http" | "https" => Ok(Some(url)),
                    other => Err(CoreError::Config(format!(
                        "backup URL must be http or https, got {}",
                        other
                    ))),
                }
            }
        }
    }

    /// Deadline for the startup backup fetch.
    pub fn backup_timeout(&self) -> Duration {
        Duration::from_secs(self.backup_timeout_secs)
    }

    /// Directory scanned for alert sounds.
    pub fn sounds_dir(&self) -> PathBuf {
        self.sounds_dir
            .clone()
            .unwrap_or_else(|| self.public_dir.join("sounds"))
    }

    /// Address to bind the HTTP listener to.
    pub fn socket_addr(&self) -> CoreResult<SocketAddr> {
        format!("{}:{}", self.bind_host, self.port)
            .parse()
            .map_err(|_| {
                CoreError::Config(format!(
                    "invalid bind address {}:{}",
                    self.bind_host, self.port
                ))
            })
    }
}
