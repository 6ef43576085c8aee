//! Domain entities for Beaver Kiosk.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from network libraries, async runtimes, or UI
//!   frameworks.
//! - Can be compiled and tested anywhere without external setup.
//!
//! Here the rules are small but precise: which characters may be dialed, how
//! long a dialed number may grow, and which call/hold/speaker transitions are
//! allowed.  The relay and the kiosk UI depend on this module; it never depends
//! on them.

/// Saved extensions shown next to the dialpad.
pub mod contacts;

/// A single dialable character (`0`-`9`, `*`, `#`).
pub mod dial_key;

/// The dial session state machine — the core domain concept.
///
/// See [`dial_session::DialSession`] for the main type.
pub mod dial_session;

/// The twelve keys of the dialpad grid.
pub mod dialpad;

/// Destinations listed on the kiosk menu screen.
pub mod menu;
