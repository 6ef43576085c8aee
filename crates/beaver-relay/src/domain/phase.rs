//! Lifecycle phase of the relay's WebSocket connection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the single bridge connection currently is in its lifecycle.
///
/// ```text
/// Disconnected ──connect()──▶ Connecting ──handshake ok──▶ Open
///      ▲                          │                          │
///      └────── handshake failed ──┘        close / error ────┤
///      └──────────────────────────── Closing ◀───────────────┘
/// ```
///
/// Only `Open` accepts outbound events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPhase {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closing,
}

impl ConnectionPhase {
    pub fn is_open(self) -> bool {
        self == ConnectionPhase::Open
    }
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionPhase::Disconnected => "disconnected",
            ConnectionPhase::Connecting => "connecting",
            ConnectionPhase::Open => "open",
            ConnectionPhase::Closing => "closing",
        };
        f.write_str(name)
    }
}
