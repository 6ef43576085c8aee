//! Dialpad definition: twelve keys in telephone order with their letter hints.

use crate::domain::dial_key::DialKey;

/// One button of the dialpad grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialpadKey {
    /// The key sent to the bridge when the button is pressed.
    pub key: DialKey,
    /// Letters printed under the digit, if any (`"ABC"` under `2`).
    pub subtext: Option<&'static str>,
}

impl DialpadKey {
    const fn new(c: char, subtext: Option<&'static str>) -> Self {
        Self {
            key: DialKey::from_static(c),
            subtext,
        }
    }

    /// Accessible label: `"2 ABC"`, or just `"1"` when there is no subtext.
    pub fn accessible_label(&self) -> String {
        match self.subtext {
            Some(sub) => format!("{} {sub}", self.key),
            None => self.key.to_string(),
        }
    }
}

/// The dialpad in row-major order (three columns, four rows).
pub const DIALPAD: [DialpadKey; 12] = [
    DialpadKey::new('1', None),
    DialpadKey::new('2', Some("ABC")),
    DialpadKey::new('3', Some("DEF")),
    DialpadKey::new('4', Some("GHI")),
    DialpadKey::new('5', Some("JKL")),
    DialpadKey::new('6', Some("MNO")),
    DialpadKey::new('7', Some("PQRS")),
    DialpadKey::new('8', Some("TUV")),
    DialpadKey::new('9', Some("WXYZ")),
    DialpadKey::new('*', None),
    DialpadKey::new('0', Some("+")),
    DialpadKey::new('#', None),
];
