//! DialerView: the BeaverPhone screen's behaviour, minus the pixels.
//!
//! The view owns a [`DialSession`] plus the status line, turns user input into
//! dial tones, and reflects status text pushed by the hardware bridge.  Dial
//! tones leave through the [`DialTonePort`] trait, which the infrastructure
//! layer implements on top of the bridge relay.
//!
//! # Ordering contract
//!
//! Every digit the user adds (keypad press, composer typing, or a saved
//! contact replaying its extension) produces exactly one
//! [`DialTonePort::send_dial_tone`] call, left to right, *before* the session
//! is updated.  A digit that does not fit in the 18-character number is still
//! sent.

use std::sync::Arc;

use beaver_core::{CallState, ComposerEdit, Contact, ContactDirectory, DialKey, DialSession};
use tracing::debug;

/// Status line shown when no call is in progress.
pub const READY_STATUS: &str = "Ready to dial";

/// Status line shown when a call starts.
pub const CONNECTED_STATUS: &str = "Call connected";

/// Outbound port for dial tones.
///
/// Implemented by the bridge relay adapter in production and by a mock in
/// tests.  Sending is fire-and-forget: when the bridge is unreachable the
/// implementation logs and drops the tone.
#[cfg_attr(test, mockall::automock)]
pub trait DialTonePort: Send + Sync {
    fn send_dial_tone(&self, key: DialKey);
}

/// Keys the composer field reacts to besides text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerKey {
    /// Toggles the call.
    Enter,
    /// Resets the dialer when the number is already empty.
    Backspace,
}

/// The dialer screen state and its input handlers.
pub struct DialerView {
    session: DialSession,
    status: String,
    contacts: ContactDirectory,
    tones: Arc<dyn DialTonePort>,
}

impl DialerView {
    /// Mounts a fresh dialer: empty number, idle, status "Ready to dial".
    pub fn new(tones: Arc<dyn DialTonePort>, contacts: ContactDirectory) -> Self {
        Self {
            session: DialSession::new(),
            status: READY_STATUS.to_string(),
            contacts,
            tones,
        }
    }

    pub fn session(&self) -> &DialSession {
        &self.session
    }

    pub fn dialed_number(&self) -> &str {
        self.session.dialed_number()
    }

    /// The status line under the dialpad.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn contacts(&self) -> &ContactDirectory {
        &self.contacts
    }

    // ── Input handlers ───────────────────────────────────────────────────────

    /// Handles a dialpad press: sends the tone, then appends the digit.
    pub fn press_key(&mut self, key: DialKey) {
        self.tones.send_dial_tone(key);
        if !self.session.append_digit(key) {
            debug!("dialed number is full; {key} sent but not shown");
        }
    }

    /// Handles each dialable character of `keys`, in order.
    pub fn press_keys(&mut self, keys: &[DialKey]) {
        for key in keys {
            self.press_key(*key);
        }
    }

    /// Removes the last digit.  No tone is sent.
    pub fn erase_digit(&mut self) -> Option<DialKey> {
        self.session.erase_digit()
    }

    /// Clears the number, call, and hold.  Speaker is kept.
    pub fn reset(&mut self) {
        let was_on_call = self.session.is_on_call();
        self.session.reset();
        if was_on_call {
            self.status = READY_STATUS.to_string();
        }
    }

    /// Starts or ends the call and updates the status line to match.
    pub fn toggle_call(&mut self) -> CallState {
        let state = self.session.toggle_call();
        self.status = if self.session.is_on_call() {
            CONNECTED_STATUS.to_string()
        } else {
            READY_STATUS.to_string()
        };
        state
    }

    /// Toggles hold.  Does nothing outside a call.
    pub fn toggle_hold(&mut self) -> bool {
        self.session.toggle_hold()
    }

    pub fn toggle_speaker(&mut self) -> bool {
        self.session.toggle_speaker()
    }

    /// Handles free-text input in the number field.
    ///
    /// The text is filtered to `[0-9*#]` and the stored number is bounded to
    /// 18 characters.  When the filtered text extends the current number,
    /// each appended digit is sent in order, including any past the bound;
    /// when it is longer but differs earlier (an insertion in the middle),
    /// only its last digit is sent.
    pub fn set_composer_text(&mut self, text: &str) {
        let edit = ComposerEdit::diff(self.session.dialed_number(), text);
        for key in &edit.typed {
            self.tones.send_dial_tone(*key);
        }
        self.session.replace_number(&edit.number);
    }

    /// Handles Enter and Backspace in the number field.
    pub fn composer_key(&mut self, key: ComposerKey) {
        match key {
            ComposerKey::Enter => {
                self.toggle_call();
            }
            ComposerKey::Backspace if self.session.dialed_number().is_empty() => self.reset(),
            ComposerKey::Backspace => {}
        }
    }

    /// Dials a saved contact: the number becomes its extension, every digit
    /// of the extension is sent, and the status names the contact.
    pub fn select_contact(&mut self, contact: &Contact) {
        let keys = contact.dial_keys();
        for key in &keys {
            self.tones.send_dial_tone(*key);
        }
        self.session.replace_number(&contact.extension);
        self.status = format!("Dialing {} ({})", contact.name, contact.extension);
    }

    /// Dials the saved contact at `index` (zero-based).
    ///
    /// Returns `None`, without side effects, when there is no such contact.
    pub fn select_contact_at(&mut self, index: usize) -> Option<Contact> {
        let contact = self.contacts.get(index)?.clone();
        self.select_contact(&contact);
        Some(contact)
    }

    /// Shows text pushed by the hardware bridge, verbatim.
    pub fn apply_status_message(&mut self, message: &str) {
        self.status = message.to_string();
    }

    // ── Derived labels ───────────────────────────────────────────────────────

    pub fn call_button_label(&self) -> &'static str {
        if self.session.is_on_call() {
            "Hang up"
        } else {
            "Call"
        }
    }

    pub fn hold_button_label(&self) -> &'static str {
        if self.session.is_on_hold() {
            "Resume"
        } else {
            "Hold"
        }
    }

    pub fn speaker_button_label(&self) -> &'static str {
        if self.session.is_speaker_enabled() {
            "Speaker on"
        } else {
            "Speaker"
        }
    }

    /// Hold only makes sense during a call.
    pub fn is_hold_enabled(&self) -> bool {
        self.session.is_on_call()
    }

    /// `Idle`, `In call`, or `On hold`.
    pub fn status_pill(&self) -> &'static str {
        self.session.call_state().label()
    }

    /// Hint under the number field, based on how much has been dialed.
    pub fn helper_text(&self) -> &'static str {
        match self.session.dialed_number().len() {
            0 => "Dial a number or choose a saved extension to get started.",
            1 | 2 => "Add a few more digits, then press Call to connect.",
            _ => "Press Call to start the connection or choose an action below.",
        }
    }
}

impl std::fmt::Debug for DialerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialerView")
            .field("session", &self.session)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
