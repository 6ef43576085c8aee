//! Error taxonomy for the relay.
//!
//! None of these reach the dialer: a failed send becomes
//! [`SendOutcome::Dropped`](crate::SendOutcome::Dropped) with a warning, and
//! a closed or broken connection is answered with a scheduled reconnect.

use beaver_core::ProtocolError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::domain::ConfigError;

/// Everything that can go wrong between the kiosk and the hardware bridge.
#[derive(Debug, Error)]
pub enum RelayError {
    /// An event was sent while the connection was not open.
    #[error("bridge connection is not open")]
    ConnectionUnavailable,

    /// The WebSocket layer failed (handshake, read, or write).
    #[error("bridge transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    /// The connection ended (close frame, end of stream, or shutdown).
    #[error("bridge connection closed")]
    Closed,

    /// The configured endpoint is not usable.
    #[error(transparent)]
    InvalidEndpoint(#[from] ConfigError),

    /// An outbound event could not be serialized.
    #[error(transparent)]
    Encode(#[from] ProtocolError),
}
