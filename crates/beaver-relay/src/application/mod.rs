//! Application layer for beaver-relay.
//!
//! Knows *who* gets each incoming message and *what* a send returns, but not
//! how frames travel over the network.
//!
//! # Responsibilities
//!
//! - Keeping the registry of local subscribers and fanning messages out to
//!   them in arrival order
//! - Defining [`SendOutcome`], the non-error result of a send
//!
//! # What does NOT belong here?
//!
//! - Opening sockets or spawning the connection task (that is infrastructure)
//! - WebSocket framing (handled by tokio-tungstenite)

pub mod listeners;

pub use listeners::{ListenerRegistry, MessageListener, Subscription, SubscriptionId};

/// What happened to an outbound event.
///
/// Sending never fails loudly.  While the connection is down, events are
/// dropped (and a warning is logged), never queued for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The frame was handed to the open connection.
    Sent,
    /// The connection was not open; the event was discarded.
    Dropped,
}

impl SendOutcome {
    pub fn is_sent(self) -> bool {
        self == SendOutcome::Sent
    }
}
