//! Alarm Sync Relay - keeps every connected alarm client on the same profile document.

mod app;

use clap::Parser;
use relay_config_and_utils::{init_logging, Config};
use std::path::PathBuf;

/// Alarm sync relay command-line interface.
///
/// Flags override the config file and environment.
#[derive(Parser, Debug, Default)]
#[command(name = "alarm-sync-relay")]
#[command(about = "Real-time relay for a shared alarm-profile document")]
#[command(version)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Backup endpoint URL
    #[arg(long)]
    backup_url: Option<String>,

    /// Startup backup fetch timeout in seconds
    #[arg(long)]
    backup_timeout_secs: Option<u64>,

    /// Directory served as static files
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Directory scanned for alert sounds
    #[arg(long)]
    sounds_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log format (compact, json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = self.host {
            config.bind_host = host;
        }
        if let Some(url) = self.backup_url {
            config.backup_url = Some(url);
        }
        if let Some(secs) = self.backup_timeout_secs {
            config.backup_timeout_secs = secs;
        }
        if let Some(dir) = self.public_dir {
            config.public_dir = dir;
        }
        if let Some(dir) = self.sounds_dir {
            config.sounds_dir = Some(dir);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    init_logging(&config);

    app::run_relay(config).await
}
