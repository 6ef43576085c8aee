//! UI command bridge for the kiosk web view.
//!
//! Exposes the dialer and the bridge relay to a browser-based front-end as a
//! set of async command handlers.  Only this module references both the
//! application layer and the presentation layer.
//!
//! # How the commands are used (for beginners)
//!
//! The kiosk pages run inside a web view and call into Rust through an IPC
//! layer that serializes arguments and results as JSON:
//!
//! ```text
//! Web view (JavaScript)           IPC              Rust backend
//! ─────────────────────────────────────────────────────────────────
//! invoke("press_key", {key:"5"}) ────────────────>  press_key()
//!                                <────────────────  DialerStateDto
//! ```
//!
//! Two commands mirror the original preload API one to one:
//!
//! - [`send_dial_tone`] sends one `{"type":"dial","number":...}` frame (or
//!   drops it when the bridge is down).
//! - [`on_message`] registers a callback for bridge status text and returns a
//!   handle whose `remove()` unregisters it.
//!
//! The rest drive the [`DialerView`] and return a fresh [`DialerStateDto`] so
//! the page can re-render from a single snapshot.
//!
//! # `KioskCommandResult<T>`
//!
//! Every command returns the same envelope:
//! ```json
//! { "success": true,  "data": {...}, "error": null  }
//! { "success": false, "data": null,  "error": "..."  }
//! ```
//!
//! # Async Mutex
//!
//! The dialer sits behind a `tokio::sync::Mutex` because the handlers are
//! `async` and may run concurrently with the status feed task.

use std::sync::Arc;

use beaver_core::{Contact, ContactDirectory, DialKey, MenuDestination, DIALPAD};
use beaver_relay::{BridgeRelay, ConnectionPhase, MessageListener};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::application::dialer_view::{ComposerKey, DialTonePort, DialerView};

// ── Shared application state ──────────────────────────────────────────────────

/// State shared between command handlers.
pub struct KioskAppState {
    /// The bridge connection.
    pub relay: BridgeRelay,
    /// The mounted BeaverPhone dialer.
    pub dialer: Mutex<DialerView>,
}

impl KioskAppState {
    /// Creates the state with a dialer that sends its tones through `relay`.
    pub fn new(relay: BridgeRelay, contacts: ContactDirectory) -> Arc<Self> {
        let tones: Arc<dyn DialTonePort> = Arc::new(relay.clone());
        Self::with_tones(relay, tones, contacts)
    }

    /// Creates the state with a custom tone port.
    pub fn with_tones(
        relay: BridgeRelay,
        tones: Arc<dyn DialTonePort>,
        contacts: ContactDirectory,
    ) -> Arc<Self> {
        Arc::new(Self {
            relay,
            dialer: Mutex::new(DialerView::new(tones, contacts)),
        })
    }

    /// Copies every status line pushed by the bridge into the dialer, in
    /// arrival order, until the task is aborted.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_status_feed(self: &Arc<Self>) -> JoinHandle<()> {
        let mut subscription = self.relay.subscribe();
        let state = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(message) = subscription.recv().await {
                state.dialer.lock().await.apply_status_message(&message);
            }
            debug!("status feed ended");
        })
    }
}

// ── DTOs ──────────────────────────────────────────────────────────────────────

/// Everything the BeaverPhone page needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialerStateDto {
    pub dialed_number: String,
    pub status_message: String,
    /// `Idle`, `In call`, or `On hold`.
    pub status_pill: String,
    pub helper_text: String,
    pub is_on_call: bool,
    pub is_on_hold: bool,
    pub is_speaker_enabled: bool,
    pub hold_enabled: bool,
    pub call_button_label: String,
    pub hold_button_label: String,
    pub speaker_button_label: String,
}

impl From<&DialerView> for DialerStateDto {
    fn from(view: &DialerView) -> Self {
        let session = view.session();
        Self {
            dialed_number: view.dialed_number().to_string(),
            status_message: view.status().to_string(),
            status_pill: view.status_pill().to_string(),
            helper_text: view.helper_text().to_string(),
            is_on_call: session.is_on_call(),
            is_on_hold: session.is_on_hold(),
            is_speaker_enabled: session.is_speaker_enabled(),
            hold_enabled: view.is_hold_enabled(),
            call_button_label: view.call_button_label().to_string(),
            hold_button_label: view.hold_button_label().to_string(),
            speaker_button_label: view.speaker_button_label().to_string(),
        }
    }
}

/// One dialpad button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialpadKeyDto {
    pub label: String,
    pub subtext: Option<String>,
    pub aria_label: String,
}

/// Bridge connection as shown in the page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatusDto {
    /// Serialized as `disconnected`, `connecting`, `open`, or `closing`.
    pub phase: ConnectionPhase,
    pub endpoint: String,
}

/// Unified response wrapper for kiosk commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct KioskCommandResult<T: Serialize> {
    /// `true` if the command completed successfully; `false` on error.
    pub success: bool,
    /// The command's return value, present only when `success` is `true`.
    pub data: Option<T>,
    /// A human-readable error message, present only when `success` is `false`.
    pub error: Option<String>,
}

impl<T: Serialize> KioskCommandResult<T> {
    /// Constructs a successful result containing `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Constructs an error result containing the given message.
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Bridge commands ───────────────────────────────────────────────────────────

/// Sends one dial tone straight to the bridge.
///
/// `data` is `true` if the frame was handed to an open connection and
/// `false` if it was dropped because the bridge is not connected.
pub async fn send_dial_tone(state: Arc<KioskAppState>, number: String) -> KioskCommandResult<bool> {
    match DialKey::try_from(number) {
        Ok(key) => KioskCommandResult::ok(state.relay.send_dial_tone(key).is_sent()),
        Err(e) => KioskCommandResult::err(e.to_string()),
    }
}

/// Registers `callback` for every status line pushed by the bridge.
///
/// Keep the returned handle; `remove()` (or dropping it) unregisters the
/// callback.  Must be called from within a Tokio runtime.
pub fn on_message<F>(state: &KioskAppState, callback: F) -> MessageListener
where
    F: FnMut(&str) + Send + 'static,
{
    state.relay.on_message(callback)
}

/// Returns the bridge connection phase and endpoint.
pub async fn get_connection_status(state: Arc<KioskAppState>) -> KioskCommandResult<ConnectionStatusDto> {
    KioskCommandResult::ok(ConnectionStatusDto {
        phase: state.relay.phase(),
        endpoint: state.relay.config().endpoint.clone(),
    })
}

// ── Dialer commands ───────────────────────────────────────────────────────────

/// Returns the current dialer snapshot.
pub async fn get_dialer_state(state: Arc<KioskAppState>) -> KioskCommandResult<DialerStateDto> {
    let dialer = state.dialer.lock().await;
    KioskCommandResult::ok(DialerStateDto::from(&*dialer))
}

/// Dialpad button press.
pub async fn press_key(state: Arc<KioskAppState>, key: String) -> KioskCommandResult<DialerStateDto> {
    let key = match DialKey::try_from(key) {
        Ok(key) => key,
        Err(e) => return KioskCommandResult::err(e.to_string()),
    };
    update_dialer(&state, |dialer| dialer.press_key(key)).await
}

pub async fn erase_digit(state: Arc<KioskAppState>) -> KioskCommandResult<DialerStateDto> {
    update_dialer(&state, |dialer| {
        dialer.erase_digit();
    })
    .await
}

pub async fn reset_dialer(state: Arc<KioskAppState>) -> KioskCommandResult<DialerStateDto> {
    update_dialer(&state, DialerView::reset).await
}

pub async fn toggle_call(state: Arc<KioskAppState>) -> KioskCommandResult<DialerStateDto> {
    update_dialer(&state, |dialer| {
        dialer.toggle_call();
    })
    .await
}

pub async fn toggle_hold(state: Arc<KioskAppState>) -> KioskCommandResult<DialerStateDto> {
    update_dialer(&state, |dialer| {
        dialer.toggle_hold();
    })
    .await
}

pub async fn toggle_speaker(state: Arc<KioskAppState>) -> KioskCommandResult<DialerStateDto> {
    update_dialer(&state, |dialer| {
        dialer.toggle_speaker();
    })
    .await
}

/// The number field's `change` event.
pub async fn set_composer_text(
    state: Arc<KioskAppState>,
    text: String,
) -> KioskCommandResult<DialerStateDto> {
    update_dialer(&state, |dialer| dialer.set_composer_text(&text)).await
}

/// The number field's `keydown` event, using DOM key names.
///
/// Only `Enter` and `Backspace` do anything; other keys leave the state
/// unchanged.
pub async fn composer_key(state: Arc<KioskAppState>, key: String) -> KioskCommandResult<DialerStateDto> {
    let key = match key.as_str() {
        "Enter" => Some(ComposerKey::Enter),
        "Backspace" => Some(ComposerKey::Backspace),
        _ => None,
    };
    update_dialer(&state, |dialer| {
        if let Some(key) = key {
            dialer.composer_key(key);
        }
    })
    .await
}

/// Dials the saved contact at `index` (zero-based).
pub async fn select_contact(
    state: Arc<KioskAppState>,
    index: usize,
) -> KioskCommandResult<DialerStateDto> {
    let mut dialer = state.dialer.lock().await;
    match dialer.select_contact_at(index) {
        Some(_) => KioskCommandResult::ok(DialerStateDto::from(&*dialer)),
        None => KioskCommandResult::err(format!("no saved extension at index {index}")),
    }
}

// ── Static page data ──────────────────────────────────────────────────────────

pub async fn get_contacts(state: Arc<KioskAppState>) -> KioskCommandResult<Vec<Contact>> {
    let dialer = state.dialer.lock().await;
    KioskCommandResult::ok(dialer.contacts().all().to_vec())
}

pub fn get_dialpad() -> KioskCommandResult<Vec<DialpadKeyDto>> {
    KioskCommandResult::ok(
        DIALPAD
            .iter()
            .map(|k| DialpadKeyDto {
                label: k.key.to_string(),
                subtext: k.subtext.map(str::to_string),
                aria_label: k.accessible_label(),
            })
            .collect(),
    )
}

pub fn get_menu() -> KioskCommandResult<Vec<MenuDestination>> {
    KioskCommandResult::ok(MenuDestination::kiosk_menu())
}

async fn update_dialer<F>(state: &KioskAppState, apply: F) -> KioskCommandResult<DialerStateDto>
where
    F: FnOnce(&mut DialerView),
{
    let mut dialer = state.dialer.lock().await;
    apply(&mut dialer);
    KioskCommandResult::ok(DialerStateDto::from(&*dialer))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
