//! Domain layer for beaver-relay.
//!
//! Pure types with no dependency on I/O or the async runtime: the relay's
//! configuration and the lifecycle phase of its connection.
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `TcpStream`, or `WebSocket` types
//! - Environment variable reading at run time (the build-time default is a
//!   compile-time constant)

pub mod config;
pub mod phase;

pub use config::{ConfigError, RelayConfig, DEFAULT_ENDPOINT, DEFAULT_RECONNECT_DELAY};
pub use phase::ConnectionPhase;
