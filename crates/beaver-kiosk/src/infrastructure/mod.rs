//! Infrastructure layer for the kiosk.
//!
//! Contains the adapters that connect the application layer to the outside
//! world.
//!
//! **Dependency rule**: this layer may depend on `application`, `beaver_core`,
//! and `beaver_relay`, but MUST NOT be imported by the `application` layer.
//!
//! # Sub-modules
//!
//! - **`relay_port`** – Implements `DialTonePort` on top of the bridge relay.
//!
//! - **`ui_bridge`** – Command handlers and DTOs that expose the dialer to a
//!   web view (`send_dial_tone`, `on_message`, `get_dialer_state`, and one
//!   command per dialer action).
//!
//! - **`console`** – Text rendering of the menu and the dialpad, plus the
//!   line-driven session used by the `beaver-kiosk` binary.
//!
//! - **`storage`** – TOML configuration file.

pub mod console;
pub mod relay_port;
pub mod storage;
pub mod ui_bridge;
