//! Dialable characters.
//!
//! The hardware bridge accepts exactly twelve symbols: the digits `0`-`9` plus
//! `*` and `#`.  [`DialKey`] makes that restriction part of the type so that a
//! dial event can never carry anything else.
//!
//! On the wire a key is a one-character JSON string (`"5"`, `"#"`), which is
//! what the `#[serde(try_from, into)]` attributes below produce.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a character or string is not a single dial key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a dial key: {0:?}")]
pub struct InvalidDialKey(pub String);

/// One dialable character: `0`-`9`, `*`, or `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DialKey(char);

impl DialKey {
    /// Builds a key from a character already known to be valid.
    ///
    /// Only used for the compile-time dialpad table.
    pub(crate) const fn from_static(c: char) -> Self {
        Self(c)
    }

    /// Returns `true` if `c` may be dialed.
    pub const fn is_dial_char(c: char) -> bool {
        matches!(c, '0'..='9' | '*' | '#')
    }

    /// Returns the key for `c`, or `None` if `c` is not dialable.
    pub fn from_char(c: char) -> Option<Self> {
        Self::is_dial_char(c).then_some(Self(c))
    }

    /// The underlying character.
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Extracts every dial key from `text`, in order, skipping anything else.
    pub fn parse_all(text: &str) -> Vec<DialKey> {
        text.chars().filter_map(Self::from_char).collect()
    }
}

impl TryFrom<char> for DialKey {
    type Error = InvalidDialKey;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or_else(|| InvalidDialKey(c.to_string()))
    }
}

impl TryFrom<String> for DialKey {
    type Error = InvalidDialKey;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or(InvalidDialKey(s)),
            _ => Err(InvalidDialKey(s)),
        }
    }
}

impl From<DialKey> for String {
    fn from(key: DialKey) -> Self {
        key.0.to_string()
    }
}

impl fmt::Display for DialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drops every character of `text` that is not a dial key.
///
/// `"12a3#b"` becomes `"123#"`.
pub fn sanitize_dial_text(text: &str) -> String {
    text.chars().filter(|c| DialKey::is_dial_char(*c)).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
