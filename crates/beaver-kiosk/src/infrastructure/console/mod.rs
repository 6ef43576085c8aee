//! Line-driven kiosk front-end.
//!
//! [`KioskConsole`] ties a [`KioskShell`] to the bridge relay.  Each input
//! line is parsed into a command, applied, and answered with the re-rendered
//! screen.  While the BeaverPhone screen is mounted the console holds a relay
//! [`Subscription`]; the binary polls it with [`KioskConsole::next_status`]
//! and feeds each message back through [`KioskConsole::apply_status`].

pub mod render;

use std::sync::Arc;

use beaver_core::ContactDirectory;
use beaver_relay::{BridgeRelay, Subscription};
use tracing::{debug, warn};

use crate::application::commands::{KioskCommand, HELP_LINES};
use crate::application::dialer_view::DialTonePort;
use crate::application::kiosk_shell::{KioskScreen, KioskShell, ShellOutcome};

pub use render::{render_contacts, render_dialer, render_menu};

/// Result of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleStep {
    /// Print this and keep reading.
    Continue(String),
    /// Print this and exit.
    Quit(String),
}

/// The kiosk as seen from a terminal.
pub struct KioskConsole {
    shell: KioskShell,
    relay: BridgeRelay,
    status_feed: Option<Subscription>,
}

impl KioskConsole {
    /// Creates a console whose dialer sends tones through `relay`.
    pub fn new(relay: BridgeRelay, contacts: ContactDirectory) -> Self {
        let tones: Arc<dyn DialTonePort> = Arc::new(relay.clone());
        Self::with_tones(relay, tones, contacts)
    }

    /// Creates a console with a custom tone port.
    pub fn with_tones(
        relay: BridgeRelay,
        tones: Arc<dyn DialTonePort>,
        contacts: ContactDirectory,
    ) -> Self {
        Self {
            shell: KioskShell::new(tones, contacts),
            relay,
            status_feed: None,
        }
    }

    pub fn shell(&self) -> &KioskShell {
        &self.shell
    }

    /// Whether a relay subscription is currently held.
    pub fn has_status_feed(&self) -> bool {
        self.status_feed.is_some()
    }

    /// Renders the current screen.
    pub fn render(&self) -> String {
        match (self.shell.screen(), self.shell.dialer()) {
            (KioskScreen::BeaverPhone, Some(dialer)) => render_dialer(dialer, self.relay.phase()),
            _ => render_menu(self.shell.menu()),
        }
    }

    /// Applies one line of input.
    pub fn handle_line(&mut self, line: &str) -> ConsoleStep {
        let command = match KioskCommand::parse(line) {
            Ok(command) => command,
            Err(e) => return ConsoleStep::Continue(e.to_string()),
        };
        debug!("console command: {command:?}");

        let step = match self.shell.handle(command) {
            Ok(ShellOutcome::Updated) => ConsoleStep::Continue(self.render()),
            Ok(ShellOutcome::OpenExternal(url)) => {
                ConsoleStep::Continue(format!("Opening {url} in the kiosk browser."))
            }
            Ok(ShellOutcome::ShowHelp) => ConsoleStep::Continue(HELP_LINES.join("\n")),
            Ok(ShellOutcome::Quit) => ConsoleStep::Quit("Goodbye.".to_string()),
            Err(e) => {
                warn!("console command rejected: {e}");
                ConsoleStep::Continue(e.to_string())
            }
        };

        self.sync_status_feed();
        step
    }

    /// Waits for the next status line from the bridge.
    ///
    /// Never resolves while the BeaverPhone screen is not mounted.  Cancel
    /// safe, so it can sit in a `tokio::select!` next to stdin.
    pub async fn next_status(&mut self) -> Option<Arc<str>> {
        match self.status_feed.as_mut() {
            Some(subscription) => subscription.recv().await,
            None => std::future::pending().await,
        }
    }

    /// Shows a bridge status line and returns the re-rendered screen, or
    /// `None` if no dialer is mounted.
    pub fn apply_status(&mut self, message: &str) -> Option<String> {
        if self.shell.apply_status_message(message) {
            Some(self.render())
        } else {
            None
        }
    }

    /// Subscribes while the dialer is mounted and unsubscribes when it is not.
    fn sync_status_feed(&mut self) {
        let mounted = self.shell.dialer().is_some();
        match (mounted, self.status_feed.is_some()) {
            (true, false) => self.status_feed = Some(self.relay.subscribe()),
            (false, true) => {
                if let Some(subscription) = self.status_feed.take() {
                    subscription.unsubscribe();
                }
            }
            _ => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dialer_view::MockDialTonePort;
    use beaver_relay::RelayConfig;

    fn console() -> (KioskConsole, BridgeRelay) {
        let relay = BridgeRelay::new(RelayConfig::new("ws://127.0.0.1:9")).unwrap();
        let mut mock = MockDialTonePort::new();
        mock.expect_send_dial_tone().return_const(());
        let console =
            KioskConsole::with_tones(relay.clone(), Arc::new(mock), ContactDirectory::builtin());
        (console, relay)
    }

    fn text(step: ConsoleStep) -> String {
        match step {
            ConsoleStep::Continue(s) | ConsoleStep::Quit(s) => s,
        }
    }

    #[test]
    fn test_console_starts_on_menu() {
        let (console, _) = console();
        assert!(console.render().contains("1. BeaverPhone"));
        assert!(!console.has_status_feed());
    }

    #[test]
    fn test_opening_phone_subscribes_and_menu_unsubscribes() {
        // Arrange
        let (mut console, relay) = console();

        // Act / Assert
        let screen = text(console.handle_line("open 1"));
        assert!(screen.contains("BeaverPhone"));
        assert!(console.has_status_feed());
        assert_eq!(relay.subscriber_count(), 1);

        console.handle_line("menu");
        assert!(!console.has_status_feed());
        assert_eq!(relay.subscriber_count(), 0);
    }

    #[test]
    fn test_parse_errors_are_reported_not_fatal() {
        let (mut console, _) = console();
        let step = console.handle_line("dance");
        assert!(matches!(step, ConsoleStep::Continue(ref s) if s.contains("unknown command")));
    }

    #[test]
    fn test_quit_ends_the_session() {
        let (mut console, _) = console();
        assert!(matches!(console.handle_line("quit"), ConsoleStep::Quit(_)));
    }

    #[test]
    fn test_status_before_phone_is_ignored() {
        let (mut console, _) = console();
        assert!(console.apply_status("Ringing").is_none());
    }

    #[test]
    fn test_dialing_renders_number() {
        let (mut console, _) = console();
        console.handle_line("open 1");
        let screen = text(console.handle_line("5551234"));
        assert!(screen.contains("Number: 5551234"));
    }

    #[test]
    fn test_open_beavernet_prints_url() {
        let (mut console, _) = console();
        let out = text(console.handle_line("open 2"));
        assert_eq!(out, "Opening https://rgbeavernet.ca in the kiosk browser.");
    }

    #[test]
    fn test_feed_is_held_once_across_dialer_commands() {
        let (mut console, relay) = console();
        console.handle_line("open 1");
        console.handle_line("12");
        console.handle_line("call");
        console.handle_line("open 1");
        assert_eq!(relay.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_next_status_waits_forever_on_menu() {
        let (mut console, _) = console();
        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(20), console.next_status()).await;
        assert!(waited.is_err());
    }
}
