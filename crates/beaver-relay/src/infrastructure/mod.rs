//! Infrastructure layer for beaver-relay.
//!
//! Handles all I/O: opening the WebSocket to the hardware bridge, moving
//! frames in both directions, and timing reconnect attempts.
//!
//! # Responsibilities
//!
//! - Performing the WebSocket handshake (tokio-tungstenite)
//! - Running the per-connection read/write task
//! - Owning the single reconnect timer
//! - Stopping cleanly on shutdown
//!
//! # What does NOT belong here?
//!
//! - Dial session rules (that is beaver-core and the kiosk)
//! - Subscriber bookkeeping (that is the application layer)

pub mod connection;
pub mod relay;

pub use relay::BridgeRelay;
