//! One WebSocket session with the hardware bridge.
//!
//! [`run_connection`] performs the handshake, publishes an outbound sender
//! while the socket is open, and then multiplexes both directions in a single
//! `tokio::select!` loop until the socket closes or fails:
//!
//! ```text
//! outbound rx ──▶ ws sink        (events from BridgeRelay::send)
//! ws stream   ──▶ ListenerRegistry::dispatch   (status text from the bridge)
//! ```
//!
//! The function never reconnects on its own.  It returns the reason the
//! session ended and leaves scheduling the next attempt to the relay.

use std::sync::{Mutex, PoisonError};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, error, info};

use crate::application::ListenerRegistry;
use crate::domain::ConnectionPhase;
use crate::error::RelayError;

/// Sender half handed out while the connection is open.
pub(crate) type OutboundSender = mpsc::UnboundedSender<WsMessage>;

/// Shared state the connection task reports into.
pub(crate) struct ConnectionContext<'a> {
    pub endpoint: &'a str,
    pub phase: &'a watch::Sender<ConnectionPhase>,
    pub outbound: &'a Mutex<Option<OutboundSender>>,
    pub listeners: &'a ListenerRegistry,
}

impl ConnectionContext<'_> {
    fn set_outbound(&self, sender: Option<OutboundSender>) {
        *self.outbound.lock().unwrap_or_else(PoisonError::into_inner) = sender;
    }
}

/// Runs a single connection from handshake to close.
///
/// Phase transitions: `Connecting` → `Open` → (`Closing`) → `Disconnected`.
/// A failed handshake goes straight from `Connecting` to `Disconnected`.
///
/// Returns [`RelayError::Closed`] for an orderly end (close frame, end of
/// stream, or the relay dropping the outbound sender) and
/// [`RelayError::Transport`] when the socket failed.
pub(crate) async fn run_connection(ctx: ConnectionContext<'_>) -> RelayError {
    ctx.phase.send_replace(ConnectionPhase::Connecting);
    debug!("connecting to bridge at {}", ctx.endpoint);

    let ws_stream = match connect_async(ctx.endpoint).await {
        Ok((ws_stream, _response)) => ws_stream,
        Err(e) => {
            error!("bridge handshake with {} failed: {e}", ctx.endpoint);
            ctx.phase.send_replace(ConnectionPhase::Disconnected);
            return RelayError::Transport(e);
        }
    };

    // `ws_tx` is the sink we write frames to, `ws_rx` the stream we read from.
    let (mut ws_tx, mut ws_rx) = ws_stream.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<WsMessage>();

    ctx.set_outbound(Some(out_tx));
    ctx.phase.send_replace(ConnectionPhase::Open);
    info!("connected to bridge at {}", ctx.endpoint);

    let reason = loop {
        tokio::select! {
            outbound = out_rx.recv() => match outbound {
                Some(frame) => {
                    if let Err(e) = ws_tx.send(frame).await {
                        error!("bridge write failed: {e}");
                        break RelayError::Transport(e);
                    }
                }
                None => {
                    // The relay took the sender away: orderly shutdown.
                    ctx.phase.send_replace(ConnectionPhase::Closing);
                    if let Err(e) = ws_tx.send(WsMessage::Close(None)).await {
                        debug!("close frame not delivered: {e}");
                    }
                    break RelayError::Closed;
                }
            },

            inbound = ws_rx.next() => match inbound {
                Some(Ok(WsMessage::Text(text))) => {
                    let delivered = ctx.listeners.dispatch(&text);
                    debug!("bridge message delivered to {delivered} listener(s): {text}");
                }
                Some(Ok(WsMessage::Binary(bytes))) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let delivered = ctx.listeners.dispatch(&text);
                    debug!("binary bridge message ({} bytes) delivered to {delivered} listener(s)", bytes.len());
                }
                Some(Ok(WsMessage::Ping(data))) => {
                    // tokio-tungstenite queues the Pong reply itself.
                    debug!("bridge ping ({} bytes)", data.len());
                }
                Some(Ok(WsMessage::Pong(_))) => {
                    debug!("bridge pong received");
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    ctx.phase.send_replace(ConnectionPhase::Closing);
                    debug!("bridge sent close frame: {frame:?}");
                    break RelayError::Closed;
                }
                Some(Ok(WsMessage::Frame(_))) => {
                    debug!("raw frame from bridge (ignored)");
                }
                Some(Err(e)) => {
                    error!("bridge read failed: {e}");
                    break RelayError::Transport(e);
                }
                None => {
                    debug!("bridge stream ended");
                    break RelayError::Closed;
                }
            },
        }
    };

    ctx.set_outbound(None);
    ctx.phase.send_replace(ConnectionPhase::Disconnected);
    info!("disconnected from bridge at {}", ctx.endpoint);
    reason
}
