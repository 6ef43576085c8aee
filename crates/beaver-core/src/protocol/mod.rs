//! Protocol module containing the bridge wire events and their JSON codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_event, encode_event, ProtocolError};
pub use messages::BridgeEvent;
