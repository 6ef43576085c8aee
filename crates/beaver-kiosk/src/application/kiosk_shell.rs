//! Kiosk navigation: the menu screen and the BeaverPhone screen.
//!
//! The shell decides which screen is showing and owns the [`DialerView`]
//! while the BeaverPhone screen is mounted.  Leaving the screen drops the
//! view, so coming back always starts from a fresh dial session.

use std::sync::Arc;

use beaver_core::{ContactDirectory, MenuDestination, MenuTarget};
use thiserror::Error;
use tracing::info;

use crate::application::commands::KioskCommand;
use crate::application::dialer_view::{DialTonePort, DialerView};

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskScreen {
    Menu,
    BeaverPhone,
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// State changed (or not); re-render.
    Updated,
    /// An external page was chosen; hand the URL to the kiosk browser.
    OpenExternal(String),
    /// Print the command list.
    ShowHelp,
    /// Exit the kiosk.
    Quit,
}

/// A command that makes no sense in the current state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("open BeaverPhone first (`open 1`)")]
    DialerNotOpen,

    #[error("there is no menu destination {0}")]
    NoSuchDestination(usize),

    #[error("there is no saved extension {0}")]
    NoSuchContact(usize),
}

/// Screen state plus the mounted dialer, if any.
pub struct KioskShell {
    screen: KioskScreen,
    menu: Vec<MenuDestination>,
    contacts: ContactDirectory,
    tones: Arc<dyn DialTonePort>,
    dialer: Option<DialerView>,
}

impl KioskShell {
    /// Starts on the menu screen.
    pub fn new(tones: Arc<dyn DialTonePort>, contacts: ContactDirectory) -> Self {
        Self {
            screen: KioskScreen::Menu,
            menu: MenuDestination::kiosk_menu(),
            contacts,
            tones,
            dialer: None,
        }
    }

    pub fn screen(&self) -> KioskScreen {
        self.screen
    }

    pub fn menu(&self) -> &[MenuDestination] {
        &self.menu
    }

    /// The mounted dialer; `None` on the menu screen.
    pub fn dialer(&self) -> Option<&DialerView> {
        self.dialer.as_ref()
    }

    /// Shows the BeaverPhone screen, mounting a fresh dialer if needed.
    pub fn open_phone(&mut self) {
        if self.dialer.is_none() {
            info!("BeaverPhone screen mounted");
            self.dialer = Some(DialerView::new(
                Arc::clone(&self.tones),
                self.contacts.clone(),
            ));
        }
        self.screen = KioskScreen::BeaverPhone;
    }

    /// Returns to the menu and unmounts the dialer.
    pub fn return_to_menu(&mut self) {
        if self.dialer.take().is_some() {
            info!("BeaverPhone screen unmounted");
        }
        self.screen = KioskScreen::Menu;
    }

    /// Follows the menu card at `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::NoSuchDestination`] for an index past the menu.
    pub fn open(&mut self, index: usize) -> Result<ShellOutcome, ShellError> {
        let target = self
            .menu
            .get(index)
            .map(|destination| destination.target.clone())
            .ok_or(ShellError::NoSuchDestination(index + 1))?;

        match target {
            MenuTarget::BeaverPhone => {
                self.open_phone();
                Ok(ShellOutcome::Updated)
            }
            MenuTarget::External(url) => {
                info!("opening external destination {url}");
                Ok(ShellOutcome::OpenExternal(url))
            }
        }
    }

    /// Shows bridge text on the dialer, if it is mounted.
    ///
    /// Returns `false` when no dialer is mounted and the text was dropped.
    pub fn apply_status_message(&mut self, message: &str) -> bool {
        match self.dialer.as_mut() {
            Some(dialer) => {
                dialer.apply_status_message(message);
                true
            }
            None => false,
        }
    }

    /// Runs one command.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] when a dialer command arrives on the menu screen
    /// or an index is out of range.  The state is unchanged in that case.
    pub fn handle(&mut self, command: KioskCommand) -> Result<ShellOutcome, ShellError> {
        match command {
            KioskCommand::Menu => {
                self.return_to_menu();
                return Ok(ShellOutcome::Updated);
            }
            KioskCommand::Open(index) => return self.open(index),
            KioskCommand::Help => return Ok(ShellOutcome::ShowHelp),
            KioskCommand::Quit => return Ok(ShellOutcome::Quit),
            _ => {}
        }

        let dialer = self.dialer.as_mut().ok_or(ShellError::DialerNotOpen)?;
        match command {
            KioskCommand::PressKeys(keys) => dialer.press_keys(&keys),
            KioskCommand::ToggleCall => {
                dialer.toggle_call();
            }
            KioskCommand::ToggleHold => {
                dialer.toggle_hold();
            }
            KioskCommand::ToggleSpeaker => {
                dialer.toggle_speaker();
            }
            KioskCommand::Erase => {
                dialer.erase_digit();
            }
            KioskCommand::Clear => dialer.reset(),
            KioskCommand::SelectContact(index) => {
                if dialer.select_contact_at(index).is_none() {
                    return Err(ShellError::NoSuchContact(index + 1));
                }
            }
            KioskCommand::Compose(text) => dialer.set_composer_text(&text),
            KioskCommand::ComposerKey(key) => dialer.composer_key(key),
            KioskCommand::Menu
            | KioskCommand::Open(_)
            | KioskCommand::Help
            | KioskCommand::Quit => {}
        }
        Ok(ShellOutcome::Updated)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dialer_view::MockDialTonePort;

    fn shell_with(mock: MockDialTonePort) -> KioskShell {
        KioskShell::new(Arc::new(mock), ContactDirectory::builtin())
    }

    fn quiet_shell() -> KioskShell {
        let mut mock = MockDialTonePort::new();
        mock.expect_send_dial_tone().return_const(());
        shell_with(mock)
    }

    #[test]
    fn test_shell_starts_on_menu_without_dialer() {
        let shell = quiet_shell();
        assert_eq!(shell.screen(), KioskScreen::Menu);
        assert!(shell.dialer().is_none());
        assert_eq!(shell.menu().len(), 2);
    }

    #[test]
    fn test_dialer_commands_on_menu_are_rejected() {
        // Arrange: no tone may be sent
        let mut mock = MockDialTonePort::new();
        mock.expect_send_dial_tone().never();
        let mut shell = shell_with(mock);

        // Act
        let result = shell.handle(KioskCommand::parse("123").unwrap());

        // Assert
        assert_eq!(result, Err(ShellError::DialerNotOpen));
        assert_eq!(shell.screen(), KioskScreen::Menu);
    }

    #[test]
    fn test_open_phone_mounts_dialer() {
        let mut shell = quiet_shell();
        assert_eq!(shell.handle(KioskCommand::Open(0)), Ok(ShellOutcome::Updated));
        assert_eq!(shell.screen(), KioskScreen::BeaverPhone);
        assert_eq!(shell.dialer().unwrap().status(), "Ready to dial");
    }

    #[test]
    fn test_open_beavernet_returns_external_url() {
        let mut shell = quiet_shell();
        let outcome = shell.handle(KioskCommand::Open(1)).unwrap();
        assert_eq!(
            outcome,
            ShellOutcome::OpenExternal("https://rgbeavernet.ca".to_string())
        );
        assert_eq!(shell.screen(), KioskScreen::Menu);
    }

    #[test]
    fn test_open_out_of_range_reports_one_based_index() {
        let mut shell = quiet_shell();
        assert_eq!(
            shell.handle(KioskCommand::Open(5)),
            Err(ShellError::NoSuchDestination(6))
        );
    }

    #[test]
    fn test_returning_to_menu_drops_dial_session() {
        // Arrange
        let mut shell = quiet_shell();
        shell.open_phone();
        shell.handle(KioskCommand::parse("555").unwrap()).unwrap();
        shell.handle(KioskCommand::ToggleCall).unwrap();

        // Act
        shell.handle(KioskCommand::Menu).unwrap();
        shell.open_phone();

        // Assert: remounted with a fresh session
        let dialer = shell.dialer().unwrap();
        assert_eq!(dialer.dialed_number(), "");
        assert!(!dialer.session().is_on_call());
    }

    #[test]
    fn test_status_message_needs_mounted_dialer() {
        let mut shell = quiet_shell();
        assert!(!shell.apply_status_message("Ringing"));

        shell.open_phone();
        assert!(shell.apply_status_message("Ringing"));
        assert_eq!(shell.dialer().unwrap().status(), "Ringing");
    }

    #[test]
    fn test_unknown_contact_is_an_error() {
        let mut shell = quiet_shell();
        shell.open_phone();
        assert_eq!(
            shell.handle(KioskCommand::SelectContact(7)),
            Err(ShellError::NoSuchContact(8))
        );
    }

    #[test]
    fn test_contact_command_sends_extension() {
        // Arrange: Mom is extension 22
        let mut mock = MockDialTonePort::new();
        mock.expect_send_dial_tone()
            .withf(|k| k.as_char() == '2')
            .times(2)
            .return_const(());
        let mut shell = shell_with(mock);
        shell.open_phone();

        // Act
        shell.handle(KioskCommand::parse("contact 3").unwrap()).unwrap();

        // Assert
        assert_eq!(shell.dialer().unwrap().status(), "Dialing Mom (22)");
    }

    #[test]
    fn test_help_and_quit_work_on_any_screen() {
        let mut shell = quiet_shell();
        assert_eq!(shell.handle(KioskCommand::Help), Ok(ShellOutcome::ShowHelp));
        assert_eq!(shell.handle(KioskCommand::Quit), Ok(ShellOutcome::Quit));
    }
}
