//! JSON codec for [`BridgeEvent`]s.
//!
//! Wire format: one UTF-8 text frame per event, containing a single JSON
//! object.  There is no envelope, sequence number, or length prefix; the
//! WebSocket framing already delimits messages.

use thiserror::Error;

use crate::protocol::messages::BridgeEvent;

/// Errors that can occur while encoding or decoding a bridge event.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The event could not be serialized.
    #[error("failed to encode bridge event: {0}")]
    Encode(#[source] serde_json::Error),

    /// The text was not a valid bridge event.
    #[error("malformed bridge event: {0}")]
    Malformed(#[source] serde_json::Error),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes an event as the JSON text sent in a WebSocket frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use beaver_core::{encode_event, BridgeEvent, DialKey};
///
/// let key = DialKey::try_from('#').unwrap();
/// let text = encode_event(&BridgeEvent::dial(key)).unwrap();
/// assert_eq!(text, r##"{"type":"dial","number":"#"}"##);
/// ```
pub fn encode_event(event: &BridgeEvent) -> Result<String, ProtocolError> {
    serde_json::to_string(event).map_err(ProtocolError::Encode)
}

/// Decodes the JSON text of a WebSocket frame into an event.
///
/// The kiosk never receives events (the bridge replies with plain text), but
/// bridge simulators and tests parse what the kiosk sends with this.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] for invalid JSON, unknown `type`
/// values, or a `number` that is not exactly one dial key.
pub fn decode_event(text: &str) -> Result<BridgeEvent, ProtocolError> {
    serde_json::from_str(text).map_err(ProtocolError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dial_key::DialKey;

    #[test]
    fn test_encode_then_decode_gives_same_event() {
        let event = BridgeEvent::dial(DialKey::try_from('7').unwrap());
        let text = encode_event(&event).unwrap();
        assert_eq!(decode_event(&text).unwrap(), event);
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let err = decode_event("not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn test_decode_missing_number_is_malformed() {
        assert!(matches!(
            decode_event(r#"{"type":"dial"}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }
}
