//! In-process change notifications.
//!
//! Writers publish a [`StoreEvent`] after a successful write; every view that
//! subscribed gets its own copy and reloads from the store when it drains it.
//! Delivery is best-effort: subscribers whose receiver was dropped are pruned
//! on the next publish.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Mutex;

/// Something in the key-value store changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The destinies record was overwritten.
    ItemsUpdated,
}

impl StoreEvent {
    /// Event name as emitted by the RPC server.
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::ItemsUpdated => "itemsUpdated",
        }
    }
}

/// Broadcasts store events to any number of subscribers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber. Events published after this call are queued
    /// on the returned subscription until drained.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        Subscription { rx }
    }

    /// Delivers `event` to every live subscriber.
    pub fn publish(&self, event: StoreEvent) {
        let Ok(mut subs) = self.subscribers.lock() else {
            tracing::warn!(event = event.name(), "event bus poisoned, dropping event");
            return;
        };
        subs.retain(|tx| tx.send(event).is_ok());
        tracing::debug!(event = event.name(), subscribers = subs.len(), "published");
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

/// Receiving end of an [`EventBus`] subscription.
pub struct Subscription {
    rx: Receiver<StoreEvent>,
}

impl Subscription {
    /// Returns all events queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}
