//! beaver-relay library crate.
//!
//! This crate owns the single WebSocket connection between the kiosk and the
//! BeaverPhone hardware bridge.  It reconnects forever after a close, drops
//! outbound events while the connection is down, and fans incoming text out
//! to every local subscriber.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Dialer view / UI bridge
//!         ↕  send(BridgeEvent) / Subscription
//! [beaver-relay]
//!   ├── domain/           Pure types: RelayConfig, ConnectionPhase
//!   ├── application/      Listener registry (pub/sub), SendOutcome
//!   └── infrastructure/
//!         ├── relay/      BridgeRelay service: connect, send, reconnect timer
//!         └── connection/ One WebSocket session (tokio-tungstenite)
//!         ↕  JSON text frames
//! BeaverPhone hardware bridge
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and tokio channels only.
//! - `infrastructure` depends on all other layers plus `tokio-tungstenite`.
//!
//! # Example
//!
//! ```no_run
//! use beaver_core::{BridgeEvent, DialKey};
//! use beaver_relay::{BridgeRelay, RelayConfig};
//!
//! # async fn example() -> Result<(), beaver_relay::RelayError> {
//! let relay = BridgeRelay::new(RelayConfig::default())?;
//! relay.connect();
//!
//! let mut status = relay.subscribe();
//! if let Some(key) = DialKey::from_char('5') {
//!     relay.send(&BridgeEvent::dial(key));
//! }
//! if let Some(text) = status.recv().await {
//!     println!("bridge says: {text}");
//! }
//! # Ok(())
//! # }
//! ```

/// Domain layer: configuration and connection phase (no I/O).
pub mod domain;

/// Application layer: subscriber registry and send outcomes.
pub mod application;

/// Infrastructure layer: the relay service and its WebSocket connection task.
pub mod infrastructure;

mod error;

pub use application::{
    ListenerRegistry, MessageListener, SendOutcome, Subscription, SubscriptionId,
};
pub use domain::{ConnectionPhase, RelayConfig, DEFAULT_ENDPOINT, DEFAULT_RECONNECT_DELAY};
pub use error::RelayError;
pub use infrastructure::BridgeRelay;
