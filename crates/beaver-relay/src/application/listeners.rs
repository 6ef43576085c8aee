//! Local pub/sub for messages pushed by the hardware bridge.
//!
//! Every subscriber gets its own unbounded channel.  The connection task calls
//! [`ListenerRegistry::dispatch`] once per incoming frame, which pushes the
//! text into each channel, so every subscriber sees every message in the
//! order it arrived.  A registration is keyed by a fresh UUID, so the same
//! listener can never be registered twice.
//!
//! # Lifetimes
//!
//! A [`Subscription`] unregisters itself when it is dropped or when
//! [`Subscription::unsubscribe`] is called.  From that point on, later
//! dispatches skip it; messages already delivered to its channel stay there.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use uuid::Uuid;

/// Identity of one registration in the [`ListenerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The set of live subscribers.
///
/// The registry is shared between the relay (subscribe / unsubscribe) and the
/// connection task (dispatch).  The lock is only held while the map is
/// touched, never across an `.await`.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Mutex<HashMap<SubscriptionId, mpsc::UnboundedSender<Arc<str>>>>,
}

impl ListenerRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers a new subscriber.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let id = SubscriptionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().insert(id, tx);
        debug!("subscription {id}: registered");
        Subscription {
            id,
            rx,
            registry: Arc::downgrade(self),
        }
    }

    /// Removes a subscriber.  Returns `false` if it was not registered.
    pub fn remove(&self, id: SubscriptionId) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            debug!("subscription {id}: removed");
        }
        removed
    }

    /// Pushes `message` to every live subscriber.
    ///
    /// Subscribers whose receiving side is gone are pruned.  Returns the
    /// number of subscribers the message was delivered to.
    pub fn dispatch(&self, message: &str) -> usize {
        let message: Arc<str> = Arc::from(message);
        let mut listeners = self.lock();
        listeners.retain(|id, tx| {
            let alive = tx.send(Arc::clone(&message)).is_ok();
            if !alive {
                trace!("subscription {id}: receiver gone, pruning");
            }
            alive
        });
        listeners.len()
    }

    /// Number of live subscribers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriptionId, mpsc::UnboundedSender<Arc<str>>>> {
        // A panic while holding the guard cannot leave the map half-updated,
        // so a poisoned lock is still safe to use.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── Subscription ──────────────────────────────────────────────────────────────

/// A stream of text messages from the hardware bridge.
///
/// Dropping the subscription unregisters it.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    rx: mpsc::UnboundedReceiver<Arc<str>>,
    registry: Weak<ListenerRegistry>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next message.
    ///
    /// Returns `None` once the subscription has been removed from the
    /// registry (or the registry itself is gone) and every message already
    /// delivered has been read.  This method is cancel-safe, so it can be
    /// used as a `tokio::select!` branch.
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        self.rx.recv().await
    }

    /// Returns the next message if one is already waiting.
    pub fn try_recv(&mut self) -> Option<Arc<str>> {
        self.rx.try_recv().ok()
    }

    /// Stops receiving messages dispatched after this call.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

// ── Callback listener ─────────────────────────────────────────────────────────

/// A callback registered with [`MessageListener::spawn`].
///
/// The callback runs on its own Tokio task, once per message, in arrival
/// order.  Calling [`MessageListener::remove`] (or dropping the handle)
/// unregisters it; messages dispatched before that point are still handed to
/// the callback.
#[derive(Debug)]
pub struct MessageListener {
    id: SubscriptionId,
    registry: Weak<ListenerRegistry>,
    task: Option<JoinHandle<()>>,
}

impl MessageListener {
    /// Registers `callback` with `registry`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F>(registry: &Arc<ListenerRegistry>, mut callback: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        let mut subscription = registry.subscribe();
        let id = subscription.id();
        let task = tokio::spawn(async move {
            while let Some(message) = subscription.recv().await {
                callback(&message);
            }
            trace!("subscription {id}: callback task finished");
        });
        Self {
            id,
            registry: Arc::downgrade(registry),
            task: Some(task),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Unregisters the callback and waits until it has handled every message
    /// that was dispatched before the removal.
    pub async fn remove(mut self) {
        self.unregister();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn unregister(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl Drop for MessageListener {
    fn drop(&mut self) {
        self.unregister();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    #[test]
    fn test_dispatch_reaches_every_subscriber_in_order() {
        // Arrange
        let registry = ListenerRegistry::new();
        let mut a = registry.subscribe();
        let mut b = registry.subscribe();

        // Act
        assert_eq!(registry.dispatch("Ringing"), 2);
        assert_eq!(registry.dispatch("Call connected"), 2);

        // Assert
        for sub in [&mut a, &mut b] {
            assert_eq!(sub.try_recv().as_deref(), Some("Ringing"));
            assert_eq!(sub.try_recv().as_deref(), Some("Call connected"));
            assert!(sub.try_recv().is_none());
        }
    }

    #[test]
    fn test_unsubscribed_listener_misses_later_messages() {
        let registry = ListenerRegistry::new();
        let a = registry.subscribe();
        let mut b = registry.subscribe();

        a.unsubscribe();
        let delivered = registry.dispatch("hello");

        assert_eq!(delivered, 1);
        assert_eq!(b.try_recv().as_deref(), Some("hello"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dropping_subscription_unregisters_it() {
        let registry = ListenerRegistry::new();
        {
            let _sub = registry.subscribe();
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_messages_delivered_before_unsubscribe_are_kept() {
        let registry = ListenerRegistry::new();
        let mut sub = registry.subscribe();
        registry.dispatch("before");
        registry.remove(sub.id());
        registry.dispatch("after");

        assert_eq!(sub.try_recv().as_deref(), Some("before"));
        assert!(sub.try_recv().is_none());
    }

    #[test]
    fn test_remove_unknown_id_returns_false() {
        let registry = ListenerRegistry::new();
        let sub = registry.subscribe();
        let id = sub.id();
        drop(sub);
        assert!(!registry.remove(id));
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let registry = ListenerRegistry::new();
        let a = registry.subscribe();
        let b = registry.subscribe();
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_recv_returns_none_after_registry_is_dropped() {
        let registry = ListenerRegistry::new();
        let mut sub = registry.subscribe();
        registry.dispatch("last words");
        drop(registry);

        assert_eq!(sub.recv().await.as_deref(), Some("last words"));
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_callback_listener_sees_messages_until_removed() {
        // Arrange
        let registry = ListenerRegistry::new();
        let seen = Arc::new(StdMutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&seen);
        let listener = MessageListener::spawn(&registry, move |m| {
            sink.lock().unwrap().push(m.to_string());
        });

        // Act
        registry.dispatch("one");
        registry.dispatch("two");
        listener.remove().await;
        registry.dispatch("three");

        // Assert: "three" was dispatched after removal and never arrives
        assert_eq!(*seen.lock().unwrap(), vec!["one", "two"]);
        assert!(registry.is_empty());
    }
}
