//! Plain-text rendering of the kiosk screens.

use std::fmt::Write as _;

use beaver_core::{ContactDirectory, MenuDestination, DIALPAD, MENU_SUBTITLE, MENU_TITLE};
use beaver_relay::ConnectionPhase;

use crate::application::dialer_view::DialerView;

const RULE_WIDTH: usize = 56;

/// Renders the menu screen.
pub fn render_menu(menu: &[MenuDestination]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(MENU_TITLE, ""));
    let _ = writeln!(out, "{MENU_SUBTITLE}");
    let _ = writeln!(out);
    for (i, destination) in menu.iter().enumerate() {
        let marker = if destination.is_external() { " ↗" } else { "" };
        let _ = writeln!(out, "  {}. {}{marker}", i + 1, destination.title);
        let _ = writeln!(out, "     {}", destination.description);
    }
    let _ = writeln!(out);
    let _ = write!(out, "Type `open <n>` to continue.");
    out
}

/// Renders the BeaverPhone screen.
pub fn render_dialer(view: &DialerView, phase: ConnectionPhase) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        heading("BeaverPhone", &format!("[{}]", view.status_pill()))
    );
    let _ = writeln!(out, "Bridge: {phase}");
    let _ = writeln!(out);

    let number = if view.dialed_number().is_empty() {
        "Enter number"
    } else {
        view.dialed_number()
    };
    let _ = writeln!(out, "Number: {number}");
    let _ = writeln!(out, "        {}", view.helper_text());
    let _ = writeln!(out);

    for row in DIALPAD.chunks(3) {
        let cells: Vec<String> = row
            .iter()
            .map(|k| format!("[{:<6}]", k.accessible_label()))
            .collect();
        let _ = writeln!(out, "  {}", cells.join(" "));
    }
    let _ = writeln!(out);

    let hold = if view.is_hold_enabled() {
        view.hold_button_label().to_string()
    } else {
        format!("({})", view.hold_button_label())
    };
    let _ = writeln!(
        out,
        "  erase · {} · {} · {hold} · clear",
        view.call_button_label(),
        view.speaker_button_label()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Status: {}", view.status());
    let _ = writeln!(out);
    let _ = write!(out, "{}", render_contacts(view.contacts()));
    out
}

/// Renders the saved extensions list.
pub fn render_contacts(contacts: &ContactDirectory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Saved extensions");
    for (i, contact) in contacts.all().iter().enumerate() {
        let badge = match &contact.image {
            Some(_) => "  ".to_string(),
            None => format!("{} ", contact.initial()),
        };
        let _ = writeln!(
            out,
            "  {}. {badge}{:<28} ext {}",
            i + 1,
            contact.name,
            contact.extension
        );
        let _ = writeln!(out, "        {} · {}", contact.subtitle, contact.details);
    }
    out
}

fn heading(title: &str, right: &str) -> String {
    let used = title.chars().count() + right.chars().count() + 4;
    let fill = "─".repeat(RULE_WIDTH.saturating_sub(used));
    format!("── {title} {fill} {right}").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use beaver_core::DialKey;

    use crate::application::dialer_view::MockDialTonePort;

    fn view() -> DialerView {
        let mut mock = MockDialTonePort::new();
        mock.expect_send_dial_tone().return_const(());
        DialerView::new(Arc::new(mock), ContactDirectory::builtin())
    }

    #[test]
    fn test_menu_lists_both_destinations() {
        let text = render_menu(&MenuDestination::kiosk_menu());
        assert!(text.contains("1. BeaverPhone"));
        assert!(text.contains("2. BeaverNet.ca ↗"));
        assert!(text.contains(MENU_SUBTITLE));
    }

    #[test]
    fn test_dialer_shows_placeholder_and_helper_when_empty() {
        let text = render_dialer(&view(), ConnectionPhase::Disconnected);
        assert!(text.contains("Number: Enter number"));
        assert!(text.contains("Dial a number or choose a saved extension to get started."));
        assert!(text.contains("Bridge: disconnected"));
        assert!(text.contains("(Hold)"), "hold is disabled outside a call");
    }

    #[test]
    fn test_dialer_shows_call_state() {
        let mut v = view();
        v.press_keys(&DialKey::parse_all("1201"));
        v.toggle_call();

        let text = render_dialer(&v, ConnectionPhase::Open);

        assert!(text.contains("[In call]"));
        assert!(text.contains("Number: 1201"));
        assert!(text.contains("Hang up"));
        assert!(text.contains("Status: Call connected"));
    }

    #[test]
    fn test_contact_without_image_shows_initial() {
        let text = render_contacts(&ContactDirectory::builtin());
        assert!(text.contains("3. M Mom"));
        assert!(text.contains("ext 3434"));
    }
}
