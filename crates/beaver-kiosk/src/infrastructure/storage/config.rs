//! TOML-based configuration for the kiosk.
//!
//! Reads and writes [`KioskConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\BeaverKiosk\config.toml`
//! - Linux:    `~/.config/beaver-kiosk/config.toml`
//! - macOS:    `~/Library/Application Support/BeaverKiosk/config.toml`
//!
//! Example file:
//!
//! ```toml
//! [bridge]
//! endpoint = "ws://192.168.1.60:5001"
//! reconnect_delay_secs = 5
//!
//! [kiosk]
//! log_level = "info"
//! dev_server_url = "http://localhost:5173"
//! ```
//!
//! # Serde default values
//!
//! Every field has a `#[serde(default = "...")]` so the kiosk runs with no
//! file at all, and older files missing newer fields still load.

use std::path::{Path, PathBuf};
use std::time::Duration;

use beaver_relay::{RelayConfig, DEFAULT_ENDPOINT, DEFAULT_RECONNECT_DELAY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level kiosk configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KioskConfig {
    #[serde(default)]
    pub bridge: BridgeSection,
    #[serde(default)]
    pub kiosk: KioskSection,
}

/// Where the hardware bridge lives and how to reconnect to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BridgeSection {
    /// WebSocket URL of the BeaverPhone bridge.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds to wait between a close and the next connection attempt.
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
}

/// Front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KioskSection {
    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Development server the web view loads instead of the bundled pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server_url: Option<String>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_reconnect_delay_secs() -> u64 {
    DEFAULT_RECONNECT_DELAY.as_secs()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
        }
    }
}

impl Default for KioskSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dev_server_url: None,
        }
    }
}

impl KioskConfig {
    /// Relay settings derived from the `[bridge]` section.
    pub fn relay_config(&self) -> RelayConfig {
        RelayConfig::new(&self.bridge.endpoint)
            .with_reconnect_delay(Duration::from_secs(self.bridge.reconnect_delay_secs))
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<KioskConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `KioskConfig` from `path`, returning `KioskConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<KioskConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(KioskConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &KioskConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory plus the kiosk subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("BeaverKiosk"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("beaver-kiosk"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("BeaverKiosk")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("beaver-kiosk-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_config_points_at_builtin_endpoint() {
        // Arrange / Act
        let cfg = KioskConfig::default();

        // Assert
        assert_eq!(cfg.bridge.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.bridge.reconnect_delay_secs, 5);
        assert_eq!(cfg.kiosk.log_level, "info");
        assert!(cfg.kiosk.dev_server_url.is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: KioskConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, KioskConfig::default());
    }

    #[test]
    fn test_partial_bridge_section_keeps_other_defaults() {
        // Arrange
        let toml_str = r#"
[bridge]
endpoint = "ws://10.0.0.7:5001"
"#;

        // Act
        let cfg: KioskConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(cfg.bridge.endpoint, "ws://10.0.0.7:5001");
        assert_eq!(cfg.bridge.reconnect_delay_secs, 5);
        assert_eq!(cfg.kiosk.log_level, "info");
    }

    #[test]
    fn test_relay_config_uses_bridge_section() {
        let mut cfg = KioskConfig::default();
        cfg.bridge.endpoint = "ws://127.0.0.1:5001".to_string();
        cfg.bridge.reconnect_delay_secs = 2;

        let relay = cfg.relay_config();

        assert_eq!(relay.endpoint, "ws://127.0.0.1:5001");
        assert_eq!(relay.reconnect_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_dev_server_url_is_omitted_from_toml() {
        let toml_str = toml::to_string_pretty(&KioskConfig::default()).unwrap();
        assert!(!toml_str.contains("dev_server_url"));
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let path = scratch_path("broken.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let cfg = load_config_from(&scratch_path("does-not-exist.toml")).unwrap();
        assert_eq!(cfg, KioskConfig::default());
    }

    #[test]
    fn test_saved_config_loads_back() {
        // Arrange
        let path = scratch_path("nested/config.toml");
        let mut cfg = KioskConfig::default();
        cfg.kiosk.dev_server_url = Some("http://localhost:5173".to_string());
        cfg.kiosk.log_level = "debug".to_string();

        // Act
        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        // Assert
        assert_eq!(loaded, cfg);
    }
}
