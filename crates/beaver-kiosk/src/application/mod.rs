//! Application layer for the kiosk.
//!
//! # What use cases does the kiosk have?
//!
//! - **`dialer_view`** – The BeaverPhone screen: turns keypad presses, typed
//!   numbers, and saved contacts into dial tones, and keeps the call, hold,
//!   and speaker state.  Tones go out through the `DialTonePort` trait, which
//!   is injected at construction time.
//!
//! - **`kiosk_shell`** – Navigation between the menu and the BeaverPhone
//!   screen.  Mounting the phone screen creates a dialer; leaving drops it.
//!
//! - **`commands`** – The text form of every kiosk action, used by the
//!   console front-end.
//!
//! Nothing here knows about WebSockets; the relay is reached only through
//! `DialTonePort` and through status text handed in by the caller.

pub mod commands;
pub mod dialer_view;
pub mod kiosk_shell;

pub use commands::{CommandError, KioskCommand};
pub use dialer_view::{ComposerKey, DialTonePort, DialerView};
pub use kiosk_shell::{KioskScreen, KioskShell, ShellError, ShellOutcome};
