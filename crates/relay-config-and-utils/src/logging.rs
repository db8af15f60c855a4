//! Logging initialization for the relay.
//!
//! Thin wrapper over the observability crate so the binary only has to hand
//! over its resolved [`Config`].

use crate::Config;
use observability::{LogConfig, LogFormat};

/// Service name attached to the startup log line.
const SERVICE_NAME: &str = "alarm-sync-relay";

/// Initialize tracing from the relay configuration.
///
/// `RUST_LOG` takes precedence over `config.log_level`.
pub fn init_logging(config: &Config) {
    observability::init_with_config(log_config(config));
}

fn log_config(config: &Config) -> LogConfig {
    LogConfig {
        service_name: SERVICE_NAME.into(),
        default_level: config.log_level.clone(),
        format: LogFormat::parse(&config.log_format),
        also_stderr: true,
        log_path: config.log_file.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn log_config_follows_relay_config() {
        let mut config = Config::default();
        config.log_level = "debug".to_string();
        config.log_format = "json".to_string();
        config.log_file = Some(PathBuf::from("/tmp/relay.jsonl"));

        let log = log_config(&config);
        assert_eq!(log.service_name, SERVICE_NAME);
        assert_eq!(log.default_level, "debug");
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.log_path, Some(PathBuf::from("/tmp/relay.jsonl")));
    }

    #[test]
    fn unknown_format_falls_back_to_compact() {
        let mut config = Config::default();
        config.log_format = "fancy".to_string();
        assert_eq!(log_config(&config).format, LogFormat::Compact);
    }
}
