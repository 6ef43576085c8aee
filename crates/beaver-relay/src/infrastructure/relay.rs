//! The bridge relay service.
//!
//! [`BridgeRelay`] is a cheap-to-clone handle around shared state:
//!
//! - the connection phase (a `watch` channel, so callers can observe changes),
//! - the outbound sender slot (filled only while the socket is open),
//! - the [`ListenerRegistry`] of local subscribers,
//! - the handle of the live connection task (at most one),
//! - the single pending reconnect timer.
//!
//! # Reconnect policy
//!
//! When a connection ends for any reason (close frame, transport error, or a
//! failed handshake) exactly one reconnect is scheduled after
//! [`RelayConfig::reconnect_delay`].  There is no backoff and no attempt
//! limit.  Scheduling a reconnect aborts any timer that is still pending, so
//! a burst of closes can never pile up timers.
//!
//! All `std::sync::Mutex` guards below are dropped before any `.await`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use beaver_core::{encode_event, BridgeEvent, DialKey};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info, warn};

use crate::application::{ListenerRegistry, MessageListener, SendOutcome, Subscription};
use crate::domain::{ConnectionPhase, RelayConfig};
use crate::error::RelayError;
use crate::infrastructure::connection::{run_connection, ConnectionContext, OutboundSender};

/// How long [`BridgeRelay::shutdown`] waits for the close handshake.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// A reconnect timer that has not fired yet.
struct PendingReconnect {
    generation: u64,
    handle: JoinHandle<()>,
}

struct RelayShared {
    config: RelayConfig,
    phase: watch::Sender<ConnectionPhase>,
    outbound: Mutex<Option<OutboundSender>>,
    listeners: Arc<ListenerRegistry>,
    connection: Mutex<Option<JoinHandle<()>>>,
    reconnect: Mutex<Option<PendingReconnect>>,
    reconnect_generation: AtomicU64,
    /// Cleared by `shutdown`; no connection or timer starts afterwards.
    running: AtomicBool,
}

/// Handle to the single WebSocket link with the hardware bridge.
///
/// Clones share the same connection, subscribers, and timer.
#[derive(Clone)]
pub struct BridgeRelay {
    shared: Arc<RelayShared>,
}

impl std::fmt::Debug for BridgeRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeRelay")
            .field("endpoint", &self.shared.config.endpoint)
            .field("phase", &self.phase())
            .field("subscribers", &self.shared.listeners.len())
            .finish()
    }
}

impl BridgeRelay {
    /// Creates a relay.  Nothing is opened until [`connect`](Self::connect).
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidEndpoint`] if the endpoint is not a
    /// WebSocket URL.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        config.validate()?;
        let (phase, _) = watch::channel(ConnectionPhase::Disconnected);
        Ok(Self {
            shared: Arc::new(RelayShared {
                config,
                phase,
                outbound: Mutex::new(None),
                listeners: ListenerRegistry::new(),
                connection: Mutex::new(None),
                reconnect: Mutex::new(None),
                reconnect_generation: AtomicU64::new(0),
                running: AtomicBool::new(true),
            }),
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.shared.config
    }

    /// Current phase of the connection.
    pub fn phase(&self) -> ConnectionPhase {
        *self.shared.phase.borrow()
    }

    /// Receiver that observes every phase transition.
    pub fn watch_phase(&self) -> watch::Receiver<ConnectionPhase> {
        self.shared.phase.subscribe()
    }

    /// Opens the connection.
    ///
    /// Does nothing while the connection is open or after
    /// [`shutdown`](Self::shutdown).  Otherwise any previous connection task
    /// is aborted and a new one is spawned, so at most one connection is ever
    /// live.  Must be called from within a Tokio runtime.
    pub fn connect(&self) {
        if !self.shared.running.load(Ordering::Acquire) {
            debug!("relay is shut down; connect ignored");
            return;
        }
        if self.phase().is_open() {
            debug!("bridge connection already open; connect ignored");
            return;
        }

        let relay = self.clone();
        let task = tokio::spawn(async move {
            let shared = &relay.shared;
            let reason = run_connection(ConnectionContext {
                endpoint: &shared.config.endpoint,
                phase: &shared.phase,
                outbound: &shared.outbound,
                listeners: &shared.listeners,
            })
            .await;

            match reason {
                RelayError::Closed => debug!("bridge connection closed"),
                other => warn!("bridge connection lost: {other}"),
            }
            relay.schedule_reconnect();
        });

        if let Some(previous) = lock(&self.shared.connection).replace(task) {
            previous.abort();
        }
    }

    /// Sends `event` to the bridge if the connection is open.
    ///
    /// Never queues and never fails loudly: while the connection is not open
    /// the event is discarded with a warning and [`SendOutcome::Dropped`] is
    /// returned.
    pub fn send(&self, event: &BridgeEvent) -> SendOutcome {
        match self.try_send(event) {
            Ok(payload) => {
                info!("sent to bridge: {payload}");
                SendOutcome::Sent
            }
            Err(e) => {
                warn!("bridge not ready; {} event dropped ({e})", event.kind());
                SendOutcome::Dropped
            }
        }
    }

    /// Sends one dial tone, `{"type":"dial","number":"<key>"}`.
    pub fn send_dial_tone(&self, key: DialKey) -> SendOutcome {
        self.send(&BridgeEvent::dial(key))
    }

    /// Sends `event`, returning the JSON payload on success.
    ///
    /// # Errors
    ///
    /// - [`RelayError::ConnectionUnavailable`] if the connection is not open
    ///   (or closed while the frame was handed over).
    /// - [`RelayError::Encode`] if the event cannot be serialized.
    pub fn try_send(&self, event: &BridgeEvent) -> Result<String, RelayError> {
        let payload = encode_event(event)?;
        let outbound = lock(&self.shared.outbound);
        let tx = outbound.as_ref().ok_or(RelayError::ConnectionUnavailable)?;
        tx.send(WsMessage::Text(payload.clone()))
            .map_err(|_| RelayError::ConnectionUnavailable)?;
        Ok(payload)
    }

    /// Registers a new subscriber for text pushed by the bridge.
    pub fn subscribe(&self) -> Subscription {
        self.shared.listeners.subscribe()
    }

    /// Registers a callback for text pushed by the bridge.
    ///
    /// Keep the returned handle: dropping it, or calling
    /// [`MessageListener::remove`], unregisters the callback.
    pub fn on_message<F>(&self, callback: F) -> MessageListener
    where
        F: FnMut(&str) + Send + 'static,
    {
        MessageListener::spawn(&self.shared.listeners, callback)
    }

    /// Number of live subscribers (subscriptions plus callbacks).
    pub fn subscriber_count(&self) -> usize {
        self.shared.listeners.len()
    }

    /// Whether a reconnect timer is waiting to fire.
    pub fn has_pending_reconnect(&self) -> bool {
        lock(&self.shared.reconnect)
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// Stops the relay for good.
    ///
    /// Cancels the pending reconnect timer, closes the open connection
    /// (phase `Closing`, then `Disconnected`), and disables any further
    /// connection attempts.
    pub async fn shutdown(&self) {
        self.shared.running.store(false, Ordering::Release);

        if let Some(pending) = lock(&self.shared.reconnect).take() {
            pending.handle.abort();
        }

        // Taking the sender away makes the connection task send a close frame
        // and return.
        let was_open = lock(&self.shared.outbound).take().is_some();
        let task = lock(&self.shared.connection).take();

        if let Some(task) = task {
            if was_open {
                self.shared.phase.send_replace(ConnectionPhase::Closing);
                let abort = task.abort_handle();
                if tokio::time::timeout(SHUTDOWN_GRACE, task).await.is_err() {
                    warn!("bridge close handshake timed out; aborting connection task");
                    abort.abort();
                }
            } else {
                task.abort();
            }
        }

        self.shared.phase.send_replace(ConnectionPhase::Disconnected);
        info!("bridge relay shut down");
    }

    /// Arms the reconnect timer, replacing any timer still pending.
    fn schedule_reconnect(&self) {
        if !self.shared.running.load(Ordering::Acquire) {
            return;
        }

        let delay = self.shared.config.reconnect_delay;
        let generation = self.shared.reconnect_generation.fetch_add(1, Ordering::Relaxed) + 1;

        // The slot stays locked until the new timer is stored, so a timer that
        // fires immediately still finds its own generation there.
        let mut slot = lock(&self.shared.reconnect);
        let relay = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            relay.fire_reconnect(generation);
        });

        if let Some(previous) = slot.replace(PendingReconnect { generation, handle }) {
            previous.handle.abort();
            debug!("replaced pending reconnect timer #{}", previous.generation);
        }
        drop(slot);

        info!("reconnecting to bridge in {delay:?}");
    }

    fn fire_reconnect(&self, generation: u64) {
        {
            let mut slot = lock(&self.shared.reconnect);
            match slot.as_ref() {
                Some(pending) if pending.generation == generation => {
                    slot.take();
                }
                _ => return,
            }
        }
        debug!("reconnect timer #{generation} fired");
        self.connect();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
