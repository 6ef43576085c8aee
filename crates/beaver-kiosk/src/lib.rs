//! beaver-kiosk library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the kiosk do? (for beginners)
//!
//! The kiosk is a two-screen front-end: a menu, and a phone dialpad called
//! BeaverPhone.  Every key pressed on the dialpad is forwarded, one at a
//! time, to a hardware bridge on the local network, which plays the matching
//! tone on a real phone line.  The bridge answers with short status lines
//! ("Ringing", "Call connected", ...) that the dialer shows verbatim.
//!
//! The kiosk application:
//!
//! 1. Loads its configuration (CLI flags, environment, then `config.toml`).
//! 2. Creates the [`beaver_relay::BridgeRelay`] and starts connecting; the
//!    relay keeps reconnecting every few seconds for as long as it runs.
//! 3. Shows the menu.  Opening BeaverPhone mounts a dialer and subscribes it
//!    to the relay's status text.
//! 4. Sends one `{"type":"dial","number":"<key>"}` frame per dialed key.

/// Application layer: dialer view, navigation, and commands.
pub mod application;

/// Infrastructure layer: relay adapter, UI command bridge, console, config.
pub mod infrastructure;
