//! Kiosk menu destinations.

use serde::{Deserialize, Serialize};

/// Heading of the menu screen.
pub const MENU_TITLE: &str = "Beaver Kiosk";

/// Line under the menu heading.
pub const MENU_SUBTITLE: &str = "Select a destination to continue.";

/// Where a menu card leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum MenuTarget {
    /// The in-kiosk BeaverPhone dialer.
    BeaverPhone,
    /// An external page opened in the kiosk browser.
    External(String),
}

/// One card on the menu screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDestination {
    pub title: String,
    pub description: String,
    pub target: MenuTarget,
}

impl MenuDestination {
    /// The two cards shown on every kiosk.
    pub fn kiosk_menu() -> Vec<MenuDestination> {
        vec![
            MenuDestination {
                title: "BeaverPhone".to_string(),
                description: "Place calls through the local BeaverPhone system.".to_string(),
                target: MenuTarget::BeaverPhone,
            },
            MenuDestination {
                title: "BeaverNet.ca".to_string(),
                description: "Open the BeaverNet.ca cloud portal in the kiosk browser."
                    .to_string(),
                target: MenuTarget::External("https://rgbeavernet.ca".to_string()),
            },
        ]
    }

    pub fn is_external(&self) -> bool {
        matches!(self.target, MenuTarget::External(_))
    }
}
