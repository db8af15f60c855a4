//! # Observability
//!
//! Tracing setup shared by the alarm sync relay crates.
//!
//! Services call [`init_with_config`] once at startup and use the standard
//! `tracing` macros everywhere else. They never know where logs end up.
//!
//! Three sinks are available and can be combined:
//!
//! - stderr in a compact human format (the default)
//! - stderr as JSON lines, for log shippers that scrape container output
//! - an append-only JSONL file, tailed with `tail -f relay.jsonl | jq`
//!
//! `RUST_LOG` always wins over the configured default level.
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "alarm-sync-relay".into(),
//!     default_level: "debug".into(),
//!     ..Default::default()
//! });
//! tracing::info!("ready");
//! ```

mod file_sink;

use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

pub use file_sink::{AppendLogWriter, WriterFactory};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Output format for the stderr sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to compact.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" | "jsonl" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, written once at startup.
    pub service_name: String,

    /// Default filter directive (e.g. "info", "sync_hub=debug").
    /// Overridden by `RUST_LOG`.
    pub default_level: String,

    /// Format of the stderr sink.
    pub format: LogFormat,

    /// Emit to stderr at all.
    pub also_stderr: bool,

    /// Optional JSONL file that every event is appended to.
    pub log_path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            format: LogFormat::Compact,
            also_stderr: true,
            log_path: None,
        }
    }
}

/// Initialize the global subscriber.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place. A log file that cannot be opened is reported on
/// stderr and skipped.
pub fn init_with_config(config: LogConfig) {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.also_stderr {
        let layer = match config.format {
            LogFormat::Compact => tracing_subscriber::fmt::layer()
                .with_target(true)
                .compact()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(&config.default_level))
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(std::io::stderr)
                .with_filter(env_filter(&config.default_level))
                .boxed(),
        };
        layers.push(layer);
    }

    if let Some(path) = &config.log_path {
        match AppendLogWriter::new(path) {
            Ok(writer) => layers.push(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(WriterFactory::new(writer))
                    .with_filter(env_filter(&config.default_level))
                    .boxed(),
            ),
            Err(e) => eprintln!("failed to open log file {}: {}", path.display(), e),
        }
    }

    if tracing_subscriber::registry().with(layers).try_init().is_err() {
        return;
    }

    tracing::info!(
        service = %config.service_name,
        log_path = ?config.log_path,
        "observability initialized"
    );
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
