//! Kiosk commands and their text syntax.
//!
//! One line of console input becomes one [`KioskCommand`].  The console is the
//! stand-in for the touch screen, so the commands mirror the buttons:
//!
//! | Input          | Command                           |
//! |----------------|-----------------------------------|
//! | `123*#`        | press each key, left to right     |
//! | `call`         | call / hang up                    |
//! | `hold`         | hold / resume                     |
//! | `speaker`      | speaker on / off                  |
//! | `erase`        | erase last digit                  |
//! | `clear`        | reset the dialer                  |
//! | `contact <n>`  | dial saved contact `n` (1-based)  |
//! | `type <text>`  | set the number field to `text`    |
//! | `enter`        | Enter in the number field         |
//! | `backspace`    | Backspace in the number field     |
//! | `menu`         | back to the menu                  |
//! | `open <n>`     | open menu destination `n`         |
//! | `help`         | list commands                     |
//! | `quit`         | exit                              |

use beaver_core::DialKey;
use thiserror::Error;

use crate::application::dialer_view::ComposerKey;

/// A parsed kiosk command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskCommand {
    PressKeys(Vec<DialKey>),
    ToggleCall,
    ToggleHold,
    ToggleSpeaker,
    Erase,
    Clear,
    /// Zero-based index into the contact directory.
    SelectContact(usize),
    /// Raw text for the number field; filtering happens in the dialer.
    Compose(String),
    ComposerKey(ComposerKey),
    Menu,
    /// Zero-based index into the menu.
    Open(usize),
    Help,
    Quit,
}

/// Why a line could not be turned into a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?} (type `help` for a list)")]
    Unknown(String),

    #[error("`{command}` needs a number from 1 upwards, got {got:?}")]
    BadIndex { command: &'static str, got: String },
}

impl KioskCommand {
    /// Parses one line of console input.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for blank lines, unknown words, and missing or
    /// non-positive indices.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        if line.chars().all(DialKey::is_dial_char) {
            return Ok(KioskCommand::PressKeys(DialKey::parse_all(line)));
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "call" | "hangup" => Ok(KioskCommand::ToggleCall),
            "hold" | "resume" => Ok(KioskCommand::ToggleHold),
            "speaker" => Ok(KioskCommand::ToggleSpeaker),
            "erase" => Ok(KioskCommand::Erase),
            "clear" => Ok(KioskCommand::Clear),
            "contact" => parse_index("contact", rest).map(KioskCommand::SelectContact),
            "type" => Ok(KioskCommand::Compose(rest.to_string())),
            "enter" => Ok(KioskCommand::ComposerKey(ComposerKey::Enter)),
            "backspace" => Ok(KioskCommand::ComposerKey(ComposerKey::Backspace)),
            "menu" => Ok(KioskCommand::Menu),
            "open" => parse_index("open", rest).map(KioskCommand::Open),
            "help" | "?" => Ok(KioskCommand::Help),
            "quit" | "exit" => Ok(KioskCommand::Quit),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}

/// Parses a 1-based index into a zero-based one.
fn parse_index(command: &'static str, text: &str) -> Result<usize, CommandError> {
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::BadIndex {
            command,
            got: text.to_string(),
        }),
    }
}

/// One-line summaries printed by `help`.
pub const HELP_LINES: &[&str] = &[
    "0-9 * #        press keys (e.g. 5551234)",
    "call           call / hang up",
    "hold           hold / resume (during a call)",
    "speaker        speaker on / off",
    "erase          erase the last digit",
    "clear          reset the dialer",
    "contact <n>    dial saved extension n",
    "type <text>    type into the number field",
    "enter          Enter in the number field",
    "backspace      Backspace in the number field",
    "menu           return to the menu",
    "open <n>       open menu destination n",
    "quit           exit the kiosk",
];

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_become_key_presses() {
        let cmd = KioskCommand::parse("12*#").unwrap();
        assert_eq!(cmd, KioskCommand::PressKeys(DialKey::parse_all("12*#")));
    }

    #[test]
    fn test_words_are_case_insensitive_and_trimmed() {
        assert_eq!(KioskCommand::parse("  CALL ").unwrap(), KioskCommand::ToggleCall);
        assert_eq!(KioskCommand::parse("Hold").unwrap(), KioskCommand::ToggleHold);
    }

    #[test]
    fn test_contact_index_is_one_based() {
        assert_eq!(
            KioskCommand::parse("contact 2").unwrap(),
            KioskCommand::SelectContact(1)
        );
    }

    #[test]
    fn test_contact_zero_is_rejected() {
        assert_eq!(
            KioskCommand::parse("contact 0").unwrap_err(),
            CommandError::BadIndex {
                command: "contact",
                got: "0".to_string()
            }
        );
    }

    #[test]
    fn test_open_without_index_is_rejected() {
        assert!(matches!(
            KioskCommand::parse("open"),
            Err(CommandError::BadIndex { command: "open", .. })
        ));
    }

    #[test]
    fn test_type_keeps_raw_text() {
        assert_eq!(
            KioskCommand::parse("type 555-12 34").unwrap(),
            KioskCommand::Compose("555-12 34".to_string())
        );
    }

    #[test]
    fn test_composer_keys() {
        assert_eq!(
            KioskCommand::parse("enter").unwrap(),
            KioskCommand::ComposerKey(ComposerKey::Enter)
        );
        assert_eq!(
            KioskCommand::parse("backspace").unwrap(),
            KioskCommand::ComposerKey(ComposerKey::Backspace)
        );
    }

    #[test]
    fn test_blank_and_unknown_lines() {
        assert_eq!(KioskCommand::parse("   ").unwrap_err(), CommandError::Empty);
        assert!(matches!(
            KioskCommand::parse("dance"),
            Err(CommandError::Unknown(_))
        ));
    }

    #[test]
    fn test_digits_mixed_with_letters_are_not_key_presses() {
        assert!(KioskCommand::parse("12ab").is_err());
    }
}
