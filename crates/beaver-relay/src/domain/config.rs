//! Relay configuration types.
//!
//! [`RelayConfig`] holds everything the relay needs to reach the hardware
//! bridge.  The default endpoint is fixed at build time: set
//! `BEAVERPHONE_WS_URL` while compiling to bake in a different bridge address.
//! The kiosk binary layers its own runtime overrides on top of this struct.

use std::time::Duration;

use thiserror::Error;

/// Bridge address used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = match option_env!("BEAVERPHONE_WS_URL") {
    Some(url) => url,
    None => "ws://192.168.1.60:5001",
};

/// Fixed delay between a close and the next connection attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Errors raised while validating a [`RelayConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint is not a `ws://` or `wss://` URL with a host.
    #[error("invalid bridge endpoint {0:?}: expected ws://host[:port][/path] or wss://...")]
    InvalidEndpoint(String),
}

/// All runtime configuration for the bridge relay.
///
/// # Example
///
/// ```rust
/// use beaver_relay::domain::RelayConfig;
///
/// let cfg = RelayConfig::default();
/// assert!(cfg.endpoint.starts_with("ws"));
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// WebSocket URL of the hardware bridge.
    pub endpoint: String,

    /// How long to wait after a close (or a failed handshake) before the
    /// next attempt.  There is no backoff: every attempt waits this long.
    pub reconnect_delay: Duration,
}

impl RelayConfig {
    /// Creates a config for `endpoint` with the default reconnect delay.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    /// Returns a copy with a different reconnect delay.
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Checks that the endpoint looks like a WebSocket URL.
    ///
    /// Only the scheme and the presence of a host are checked here; anything
    /// else is left to the WebSocket handshake.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the scheme is not `ws` or
    /// `wss`, or if no host follows it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rest = self
            .endpoint
            .strip_prefix("ws://")
            .or_else(|| self.endpoint.strip_prefix("wss://"))
            .ok_or_else(|| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.starts_with(':') || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    /// | Field           | Default                                       |
    /// |-----------------|-----------------------------------------------|
    /// | endpoint        | `BEAVERPHONE_WS_URL` at build time, else `ws://192.168.1.60:5001` |
    /// | reconnect_delay | 5 seconds                                     |
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
