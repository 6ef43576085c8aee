//! Dial session domain entity.
//!
//! A [`DialSession`] is the state behind one BeaverPhone screen: the number
//! being composed and three flags (call, hold, speaker).  It is created when
//! the dialer view mounts and dropped when the view unmounts.
//!
//! # State machine
//!
//! ```text
//!            toggle_call                 toggle_hold
//!   Idle  ───────────────►  InCall  ◄───────────────►  OnHold
//!     ▲                        │                          │
//!     └──── toggle_call ───────┴──────── toggle_call ─────┘
//! ```
//!
//! - Digits can be appended, erased, or cleared in any state.
//! - `toggle_hold` does nothing outside a call.
//! - Leaving or entering a call always clears the hold flag.
//! - The speaker flag is independent of everything else and survives `reset`.
//!
//! The session has no side effects.  Forwarding digits to the hardware bridge
//! is the dialer view's job; this type only decides what the new state is.

use crate::domain::dial_key::{sanitize_dial_text, DialKey};

/// Maximum number of characters kept in the dialed number.
pub const MAX_DIALED_LEN: usize = 18;

/// Coarse call state derived from the call and hold flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    /// No call in progress.
    Idle,
    /// A call is connected and active.
    InCall,
    /// A call is connected but on hold.
    OnHold,
}

impl CallState {
    /// Text shown in the status pill of the dialer header.
    pub const fn label(self) -> &'static str {
        match self {
            CallState::Idle => "Idle",
            CallState::InCall => "In call",
            CallState::OnHold => "On hold",
        }
    }
}

/// The result of comparing free-text composer input with the current number.
///
/// Built by [`ComposerEdit::diff`] before the session is updated, so that the
/// caller can forward the typed digits first and commit the number second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerEdit {
    /// The sanitized, bounded number that should replace the current one.
    pub number: String,
    /// Digits the user added, in the order they must be forwarded.
    pub typed: Vec<DialKey>,
}

impl ComposerEdit {
    /// Computes the edit that turns `previous` into the composer text `raw`.
    ///
    /// `raw` is filtered to `[0-9*#]`.  When the filtered text is longer than
    /// `previous`:
    ///
    /// - if it extends `previous`, every appended digit is reported as typed;
    /// - otherwise (an insertion in the middle) only the last digit is.
    ///
    /// Deletions and same-length edits report nothing typed.  Typed digits are
    /// taken before the bound, so keys past [`MAX_DIALED_LEN`] are still
    /// forwarded even though only the first [`MAX_DIALED_LEN`] are kept.
    pub fn diff(previous: &str, raw: &str) -> Self {
        let sanitized = sanitize_dial_text(raw);

        let typed = if sanitized.len() <= previous.len() {
            Vec::new()
        } else if let Some(suffix) = sanitized.strip_prefix(previous) {
            DialKey::parse_all(suffix)
        } else {
            sanitized
                .chars()
                .last()
                .and_then(DialKey::from_char)
                .into_iter()
                .collect()
        };

        let mut number = sanitized;
        number.truncate(MAX_DIALED_LEN);

        Self { number, typed }
    }
}

/// Per-view dial state: dialed number plus call, hold, and speaker flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialSession {
    dialed_number: String,
    on_call: bool,
    on_hold: bool,
    speaker_enabled: bool,
}

impl DialSession {
    /// Creates an idle session with an empty number and every flag off.
    pub fn new() -> Self {
        Self::default()
    }

    /// The digits composed so far.  Only ever contains `[0-9*#]`.
    pub fn dialed_number(&self) -> &str {
        &self.dialed_number
    }

    pub fn is_on_call(&self) -> bool {
        self.on_call
    }

    pub fn is_on_hold(&self) -> bool {
        self.on_hold
    }

    pub fn is_speaker_enabled(&self) -> bool {
        self.speaker_enabled
    }

    /// Returns the coarse state used for the status pill.
    pub fn call_state(&self) -> CallState {
        match (self.on_call, self.on_hold) {
            (false, _) => CallState::Idle,
            (true, false) => CallState::InCall,
            (true, true) => CallState::OnHold,
        }
    }

    /// Appends `key` to the dialed number.
    ///
    /// The first [`MAX_DIALED_LEN`] characters are kept; once the number is
    /// full further keys are not stored.  Returns `true` if the key was stored.
    pub fn append_digit(&mut self, key: DialKey) -> bool {
        if self.dialed_number.len() >= MAX_DIALED_LEN {
            tracing::trace!("dialed number full; {key} not stored");
            return false;
        }
        self.dialed_number.push(key.as_char());
        true
    }

    /// Removes the last character of the dialed number, if any.
    pub fn erase_digit(&mut self) -> Option<DialKey> {
        self.dialed_number.pop().and_then(DialKey::from_char)
    }

    /// Replaces the dialed number with the dialable characters of `number`,
    /// bounded to [`MAX_DIALED_LEN`].
    pub fn replace_number(&mut self, number: &str) {
        let mut cleaned = sanitize_dial_text(number);
        cleaned.truncate(MAX_DIALED_LEN);
        self.dialed_number = cleaned;
    }

    /// Clears the number and the call and hold flags.  Speaker is kept.
    pub fn reset(&mut self) {
        *self = Self {
            speaker_enabled: self.speaker_enabled,
            ..Self::default()
        };
    }

    /// Starts a call when idle, ends it when in one.  Hold is always cleared.
    ///
    /// Returns the new call state.
    pub fn toggle_call(&mut self) -> CallState {
        self.on_call = !self.on_call;
        self.on_hold = false;
        self.call_state()
    }

    /// Toggles hold.  Has no effect unless a call is in progress.
    ///
    /// Returns `true` if the hold flag changed.
    pub fn toggle_hold(&mut self) -> bool {
        if !self.on_call {
            return false;
        }
        self.on_hold = !self.on_hold;
        true
    }

    /// Flips the speaker flag and returns its new value.
    pub fn toggle_speaker(&mut self) -> bool {
        self.speaker_enabled = !self.speaker_enabled;
        self.speaker_enabled
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> DialKey {
        DialKey::try_from(c).unwrap()
    }

    fn dial(session: &mut DialSession, digits: &str) {
        for c in digits.chars() {
            session.append_digit(key(c));
        }
    }

    // ── Digits ────────────────────────────────────────────────────────────────

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = DialSession::new();
        assert_eq!(session.dialed_number(), "");
        assert_eq!(session.call_state(), CallState::Idle);
        assert!(!session.is_speaker_enabled());
    }

    #[test]
    fn test_append_digit_builds_number_in_order() {
        // Arrange
        let mut session = DialSession::new();

        // Act
        dial(&mut session, "911#");

        // Assert
        assert_eq!(session.dialed_number(), "911#");
    }

    #[test]
    fn test_append_digit_keeps_first_eighteen_characters() {
        // Arrange
        let mut session = DialSession::new();
        let input = "1234567890*#1234567890";

        // Act
        dial(&mut session, input);

        // Assert: the oldest digits are kept, later ones are not stored
        assert_eq!(session.dialed_number().len(), MAX_DIALED_LEN);
        assert_eq!(session.dialed_number(), &input[..MAX_DIALED_LEN]);
    }

    #[test]
    fn test_append_digit_reports_whether_key_was_stored() {
        let mut session = DialSession::new();
        dial(&mut session, &"5".repeat(MAX_DIALED_LEN - 1));
        assert!(session.append_digit(key('6')));
        assert!(!session.append_digit(key('7')));
    }

    #[test]
    fn test_erase_digit_removes_last_character() {
        let mut session = DialSession::new();
        dial(&mut session, "123");
        assert_eq!(session.erase_digit(), Some(key('3')));
        assert_eq!(session.dialed_number(), "12");
    }

    #[test]
    fn test_erase_digit_on_empty_number_is_noop() {
        let mut session = DialSession::new();
        assert_eq!(session.erase_digit(), None);
        assert_eq!(session.dialed_number(), "");
    }

    #[test]
    fn test_replace_number_sanitizes_and_bounds() {
        let mut session = DialSession::new();
        session.replace_number("12a3#b");
        assert_eq!(session.dialed_number(), "123#");

        session.replace_number(&"9".repeat(40));
        assert_eq!(session.dialed_number().len(), MAX_DIALED_LEN);
    }

    // ── Call / hold / speaker ─────────────────────────────────────────────────

    #[test]
    fn test_toggle_call_enters_and_leaves_call() {
        let mut session = DialSession::new();
        assert_eq!(session.toggle_call(), CallState::InCall);
        assert_eq!(session.toggle_call(), CallState::Idle);
    }

    #[test]
    fn test_toggle_hold_outside_call_has_no_effect() {
        // Arrange
        let mut session = DialSession::new();

        // Act
        let changed = session.toggle_hold();

        // Assert
        assert!(!changed);
        assert!(!session.is_on_hold());
    }

    #[test]
    fn test_toggle_hold_during_call_flips_flag() {
        let mut session = DialSession::new();
        session.toggle_call();
        assert!(session.toggle_hold());
        assert_eq!(session.call_state(), CallState::OnHold);
        assert!(session.toggle_hold());
        assert_eq!(session.call_state(), CallState::InCall);
    }

    #[test]
    fn test_hanging_up_while_on_hold_clears_hold() {
        // Arrange: in a call and on hold
        let mut session = DialSession::new();
        session.toggle_call();
        session.toggle_hold();
        assert!(session.is_on_hold());

        // Act
        session.toggle_call();

        // Assert
        assert!(!session.is_on_call());
        assert!(!session.is_on_hold());
    }

    #[test]
    fn test_speaker_toggles_independently_of_call_state() {
        let mut session = DialSession::new();
        assert!(session.toggle_speaker());
        session.toggle_call();
        assert!(session.is_speaker_enabled());
        assert!(!session.toggle_speaker());
        assert!(session.is_on_call());
    }

    #[test]
    fn test_reset_keeps_speaker_and_clears_everything_else() {
        // Arrange
        let mut session = DialSession::new();
        dial(&mut session, "3434");
        session.toggle_speaker();
        session.toggle_call();
        session.toggle_hold();

        // Act
        session.reset();

        // Assert
        assert_eq!(session.dialed_number(), "");
        assert!(!session.is_on_call());
        assert!(!session.is_on_hold());
        assert!(session.is_speaker_enabled());
    }

    #[test]
    fn test_call_state_labels() {
        assert_eq!(CallState::Idle.label(), "Idle");
        assert_eq!(CallState::InCall.label(), "In call");
        assert_eq!(CallState::OnHold.label(), "On hold");
    }

    // ── Composer diff ─────────────────────────────────────────────────────────

    #[test]
    fn test_composer_diff_reports_single_typed_digit() {
        let edit = ComposerEdit::diff("12", "123");
        assert_eq!(edit.number, "123");
        assert_eq!(edit.typed, vec![key('3')]);
    }

    #[test]
    fn test_composer_diff_sanitizes_free_text() {
        let edit = ComposerEdit::diff("", "12a3#b");
        assert_eq!(edit.number, "123#");
        assert_eq!(edit.typed, DialKey::parse_all("123#"));
    }

    #[test]
    fn test_composer_diff_pasted_suffix_reports_every_digit_in_order() {
        let edit = ComposerEdit::diff("1", "1-800-55");
        assert_eq!(edit.number, "180055");
        assert_eq!(edit.typed, DialKey::parse_all("80055"));
    }

    #[test]
    fn test_composer_diff_mid_insert_reports_last_digit() {
        // "13" → "123": longer, but not an extension of "13"
        let edit = ComposerEdit::diff("13", "123");
        assert_eq!(edit.number, "123");
        assert_eq!(edit.typed, vec![key('3')]);
    }

    #[test]
    fn test_composer_diff_deletion_reports_nothing() {
        let edit = ComposerEdit::diff("123", "12");
        assert_eq!(edit.number, "12");
        assert!(edit.typed.is_empty());
    }

    #[test]
    fn test_composer_diff_ignored_characters_report_nothing() {
        let edit = ComposerEdit::diff("12", "12x");
        assert_eq!(edit.number, "12");
        assert!(edit.typed.is_empty());
    }

    #[test]
    fn test_composer_diff_bounds_number_but_reports_overflow_digit() {
        let full = "1".repeat(MAX_DIALED_LEN);
        let edit = ComposerEdit::diff(&full, &format!("{full}9"));
        assert_eq!(edit.number, full);
        assert_eq!(edit.typed, vec![key('9')]);
    }

    #[test]
    fn test_composer_diff_long_paste_reports_every_digit() {
        let pasted = "5".repeat(25);
        let edit = ComposerEdit::diff("", &pasted);
        assert_eq!(edit.number.len(), MAX_DIALED_LEN);
        assert_eq!(edit.typed.len(), 25);
    }
}
