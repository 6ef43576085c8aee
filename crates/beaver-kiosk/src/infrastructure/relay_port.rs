//! `DialTonePort` backed by the bridge relay.

use beaver_core::DialKey;
use beaver_relay::BridgeRelay;

use crate::application::dialer_view::DialTonePort;

/// Forwards each tone to the relay.
///
/// The relay logs and drops the tone when the bridge is not connected, so
/// there is nothing to report back to the dialer.
impl DialTonePort for BridgeRelay {
    fn send_dial_tone(&self, key: DialKey) {
        let _ = BridgeRelay::send_dial_tone(self, key);
    }
}
