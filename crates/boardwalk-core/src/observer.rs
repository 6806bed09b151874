//! Observer interface and the bus that owns subscriptions.
//!
//! Subscribers are boxed and owned by the bus, so dropping the bus (or the
//! session that holds it) tears every subscription down with it.

use std::fmt;
use std::sync::mpsc::Sender;

/// Receives published events.
pub trait Observer<E>: Send {
    /// Called once for every event published while subscribed.
    fn notify(&mut self, event: &E);
}

/// Channel delivery: each event is cloned into the channel.
impl<E: Clone + Send> Observer<E> for Sender<E> {
    fn notify(&mut self, event: &E) {
        // A hung-up receiver has stopped listening; nothing to do.
        let _ = self.send(event.clone());
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Fan-out of events to the currently subscribed observers, in subscription
/// order.
pub struct EventBus<E> {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn Observer<E>>)>,
}

impl<E> EventBus<E> {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            observers: Vec::new(),
        }
    }

    /// Registers an observer and returns the handle used to remove it.
    pub fn subscribe(&mut self, observer: Box<dyn Observer<E>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes an observer. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Delivers `event` to every subscriber.
    pub fn publish(&mut self, event: &E) {
        for (_, observer) in &mut self.observers {
            observer.notify(event);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.observers.len())
            .finish()
    }
}
