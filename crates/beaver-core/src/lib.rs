//! # beaver-core
//!
//! Shared library for Beaver Kiosk containing the dial session state machine,
//! the static kiosk data (dialpad keys, saved contacts, menu destinations), and
//! the wire events exchanged with the BeaverPhone hardware bridge.
//!
//! This crate is used by both the relay and the kiosk front-end.  It has zero
//! dependencies on sockets, async runtimes, or UI frameworks.
//!
//! # Architecture overview (for beginners)
//!
//! Beaver Kiosk is a touch-screen front-end with two screens: a menu and a
//! virtual phone dialpad ("BeaverPhone").  Every digit the user taps is
//! forwarded to a small hardware bridge on the local network, which answers
//! with free-form status text.
//!
//! - **`domain`** – Pure kiosk logic.  The most important piece is the
//!   [`DialSession`]: the dialed number plus the call, hold, and speaker flags,
//!   with the transitions allowed between them.
//!
//! - **`protocol`** – How a dial event travels over the socket.  Events are a
//!   closed tagged enum ([`BridgeEvent`]) encoded as a small JSON object.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `beaver_core::DialSession` instead of `beaver_core::domain::dial_session::DialSession`.
pub use domain::contacts::{Contact, ContactDirectory};
pub use domain::dial_key::{sanitize_dial_text, DialKey, InvalidDialKey};
pub use domain::dial_session::{CallState, ComposerEdit, DialSession, MAX_DIALED_LEN};
pub use domain::dialpad::{DialpadKey, DIALPAD};
pub use domain::menu::{MenuDestination, MenuTarget, MENU_SUBTITLE, MENU_TITLE};
pub use protocol::codec::{decode_event, encode_event, ProtocolError};
pub use protocol::messages::BridgeEvent;
