//! Beaver Kiosk: entry point.
//!
//! Starts the bridge relay, then drives the kiosk screens from standard
//! input.  Each line is a command (`help` lists them); the re-rendered screen
//! is printed after every command and after every status line the bridge
//! pushes while the BeaverPhone screen is open.
//!
//! # Usage
//!
//! ```text
//! beaver-kiosk [OPTIONS]
//!
//! Options:
//!   --endpoint <URL>               Bridge WebSocket URL
//!   --reconnect-delay-secs <SECS>  Delay between reconnect attempts
//!   --config <PATH>                Config file to load instead of the default
//!   --log-level <LEVEL>            Log level when RUST_LOG is not set
//!   --dev-server-url <URL>         Development server for the web view
//!   --write-config                 Save the merged settings and exit
//! ```
//!
//! # Precedence
//!
//! CLI arguments (or their environment variables) win over the TOML config
//! file, which wins over the built-in defaults.
//!
//! | Variable               | Overrides                   |
//! |------------------------|-----------------------------|
//! | `BEAVERPHONE_WS_URL`   | `[bridge] endpoint`         |
//! | `VITE_DEV_SERVER_URL`  | `[kiosk] dev_server_url`    |
//! | `RUST_LOG`             | everything about log levels |

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use beaver_core::ContactDirectory;
use beaver_kiosk::infrastructure::console::{ConsoleStep, KioskConsole};
use beaver_kiosk::infrastructure::storage::{
    config_file_path, load_config, load_config_from, save_config_to, KioskConfig,
};
use beaver_relay::BridgeRelay;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Beaver Kiosk.
///
/// Menu and BeaverPhone dialer that forwards every pressed digit to the
/// hardware bridge over WebSocket.
#[derive(Debug, Parser)]
#[command(
    name = "beaver-kiosk",
    about = "Kiosk menu and BeaverPhone dialer for the Beaver hardware bridge",
    version
)]
struct Cli {
    /// WebSocket URL of the BeaverPhone bridge.
    #[arg(long, env = "BEAVERPHONE_WS_URL")]
    endpoint: Option<String>,

    /// Seconds to wait after a close before reconnecting.
    #[arg(long)]
    reconnect_delay_secs: Option<u64>,

    /// Config file to load instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long)]
    log_level: Option<String>,

    /// Development server the web view should load.
    #[arg(long, env = "VITE_DEV_SERVER_URL")]
    dev_server_url: Option<String>,

    /// Save the merged settings to the config file and exit.
    ///
    /// Writes to `--config` when given, otherwise to the platform default.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Loads the config file and applies the CLI overrides on top.
    ///
    /// Also returns where to save the result when `--write-config` was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if `--write-config` has no platform default to fall back on.
    fn into_kiosk_config(self) -> anyhow::Result<(KioskConfig, Option<PathBuf>)> {
        let write_to = match (self.write_config, &self.config) {
            (false, _) => None,
            (true, Some(path)) => Some(path.clone()),
            (true, None) => Some(config_file_path().context("no place to write the config")?),
        };
        let base = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => load_config().context("failed to load kiosk config")?,
        };
        Ok((self.apply_overrides(base), write_to))
    }

    fn apply_overrides(self, mut config: KioskConfig) -> KioskConfig {
        if let Some(endpoint) = self.endpoint {
            config.bridge.endpoint = endpoint;
        }
        if let Some(secs) = self.reconnect_delay_secs {
            config.bridge.reconnect_delay_secs = secs;
        }
        if let Some(level) = self.log_level {
            config.kiosk.log_level = level;
        }
        if self.dev_server_url.is_some() {
            config.kiosk.dev_server_url = self.dev_server_url;
        }
        config
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, write_to) = Cli::parse().into_kiosk_config()?;

    if let Some(path) = write_to {
        save_config_to(&config, &path)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    // RUST_LOG wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.kiosk.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Beaver Kiosk starting, bridge={}", config.bridge.endpoint);
    match &config.kiosk.dev_server_url {
        Some(url) => info!("web view loads the development server at {url}"),
        None => info!("web view loads the bundled pages"),
    }

    let relay = BridgeRelay::new(config.relay_config())
        .with_context(|| format!("invalid bridge endpoint '{}'", config.bridge.endpoint))?;
    relay.connect();

    let mut console = KioskConsole::new(relay.clone(), ContactDirectory::builtin());
    println!("{}", console.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => match console.handle_line(&line) {
                    ConsoleStep::Continue(text) => println!("{text}"),
                    ConsoleStep::Quit(text) => {
                        println!("{text}");
                        break;
                    }
                },
                Ok(None) => {
                    info!("stdin closed, shutting down");
                    break;
                }
                Err(e) => {
                    error!("failed to read stdin: {e}");
                    break;
                }
            },
            Some(message) = console.next_status() => {
                if let Some(screen) = console.apply_status(&message) {
                    println!("{screen}");
                }
            }
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => info!("received Ctrl+C, initiating graceful shutdown"),
                    Err(e) => warn!("failed to listen for Ctrl+C signal: {e}"),
                }
                break;
            }
        }
    }

    relay.shutdown().await;
    info!("Beaver Kiosk stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
