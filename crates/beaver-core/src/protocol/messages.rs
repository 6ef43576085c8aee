//! Events sent from the kiosk to the BeaverPhone hardware bridge.
//!
//! # Message flow
//!
//! ```text
//! Kiosk  → Bridge:  BridgeEvent  →  JSON text frame
//! Bridge → Kiosk:   free-form text frame (status line, used verbatim)
//! ```
//!
//! Only the outbound direction has a schema.  The bridge answers with plain
//! human-readable text, which the dialer shows as-is.
//!
//! # JSON discriminant
//!
//! Every event is a JSON object with a `"type"` field that names the variant,
//! with the remaining fields flattened into the same object:
//!
//! ```json
//! {"type":"dial","number":"5"}
//! ```
//!
//! Serde's `#[serde(tag = "type")]` attribute handles this.  New event kinds
//! become new variants; the bridge never has to guess a payload's shape.

use serde::{Deserialize, Serialize};

use crate::domain::dial_key::DialKey;

/// All events the kiosk can send to the hardware bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeEvent {
    /// A single key was dialed.
    ///
    /// The bridge plays the matching DTMF tone on the phone line.  One event
    /// is sent per key, in the order the keys were pressed.
    Dial {
        /// The key, encoded as a one-character string.
        number: DialKey,
    },
}

impl BridgeEvent {
    /// Shorthand for [`BridgeEvent::Dial`].
    pub fn dial(key: DialKey) -> Self {
        BridgeEvent::Dial { number: key }
    }

    /// Short name of the variant, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeEvent::Dial { .. } => "dial",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dial_serializes_with_type_discriminant() {
        // Arrange
        let event = BridgeEvent::dial(DialKey::try_from('5').unwrap());

        // Act
        let json = serde_json::to_string(&event).unwrap();

        // Assert: exact shape the hardware bridge parses
        assert_eq!(json, r#"{"type":"dial","number":"5"}"#);
    }

    #[test]
    fn test_dial_deserializes_from_bridge_json() {
        let json = r#"{ "type": "dial", "number": "*" }"#;
        let event: BridgeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, BridgeEvent::dial(DialKey::try_from('*').unwrap()));
    }

    #[test]
    fn test_dial_with_non_dial_character_is_rejected() {
        let json = r#"{"type":"dial","number":"a"}"#;
        assert!(serde_json::from_str::<BridgeEvent>(json).is_err());
    }

    #[test]
    fn test_dial_with_multiple_characters_is_rejected() {
        let json = r#"{"type":"dial","number":"12"}"#;
        assert!(serde_json::from_str::<BridgeEvent>(json).is_err());
    }

    #[test]
    fn test_unknown_event_type_returns_error() {
        let json = r#"{"type":"hangup"}"#;
        assert!(serde_json::from_str::<BridgeEvent>(json).is_err());
    }

    #[test]
    fn test_kind_names_variant() {
        let event = BridgeEvent::dial(DialKey::try_from('0').unwrap());
        assert_eq!(event.kind(), "dial");
    }
}
