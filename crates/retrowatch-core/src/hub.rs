//! The broadcast hub.
//!
//! Each subscriber gets its own bounded queue. Publishing enqueues without
//! waiting; a subscriber whose queue is full (it stopped draining) or
//! closed (its connection went away) is dropped on the spot, so one slow
//! consumer can never hold up the poll loop or the other subscribers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use retrowatch_types::{ChangeEvent, SubscriberId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Default per-subscriber queue depth.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

/// Receiving half handed to a subscriber.
pub type EventReceiver = mpsc::Receiver<Arc<ChangeEvent>>;

/// Outcome of one [`BroadcastHub::publish`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers the event was enqueued for.
    pub delivered: usize,
    /// Subscribers removed because their queue was full or closed.
    pub dropped: usize,
}

/// Concurrency-safe set of subscribers.
#[derive(Debug)]
pub struct BroadcastHub {
    capacity: usize,
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<Arc<ChangeEvent>>>>,
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl BroadcastHub {
    /// Create a hub whose subscriber queues hold `capacity` events.
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// The set is only ever mutated by whole inserts and removes, so a
    /// poisoned lock still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<SubscriberId, mpsc::Sender<Arc<ChangeEvent>>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Add a subscriber. Events published from now on are queued for it.
    pub fn register(&self) -> (SubscriberId, EventReceiver) {
        let (tx, rx) = mpsc::channel(self.capacity);
        let id = SubscriberId::new();
        let count = {
            let mut subscribers = self.lock();
            subscribers.insert(id, tx);
            subscribers.len()
        };
        info!(subscriber = %id, subscribers = count, "subscriber registered");
        (id, rx)
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn deregister(&self, id: SubscriberId) -> bool {
        let (removed, count) = {
            let mut subscribers = self.lock();
            let removed = subscribers.remove(&id).is_some();
            (removed, subscribers.len())
        };
        if removed {
            info!(subscriber = %id, subscribers = count, "subscriber deregistered");
        }
        removed
    }

    /// Enqueue `event` for every subscriber without waiting.
    pub fn publish(&self, event: &Arc<ChangeEvent>) -> PublishReport {
        let mut report = PublishReport::default();
        let mut subscribers = self.lock();
        subscribers.retain(|id, tx| match tx.try_send(Arc::clone(event)) {
            Ok(()) => {
                report.delivered = report.delivered.saturating_add(1);
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(
                    subscriber = %id,
                    generation = event.generation,
                    "subscriber queue full, dropping subscriber"
                );
                report.dropped = report.dropped.saturating_add(1);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                debug!(subscriber = %id, "subscriber gone, pruning");
                report.dropped = report.dropped.saturating_add(1);
                false
            }
        });
        report
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Drop every queue. Each receiver drains what is left and then ends.
    pub fn close_all(&self) -> usize {
        let closed = {
            let mut subscribers = self.lock();
            let n = subscribers.len();
            subscribers.clear();
            n
        };
        if closed > 0 {
            info!(subscribers = closed, "all subscribers closed");
        }
        closed
    }
}
