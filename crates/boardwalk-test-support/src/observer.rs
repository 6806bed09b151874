//! Observer that captures published events for assertions.

use std::sync::{Arc, Mutex};

use boardwalk_core::observer::Observer;

/// An observer that appends every event it receives to a shared log.
///
/// Clone it before subscribing: the subscribed copy is owned by the bus and
/// the retained copy reads the same log.
#[derive(Debug)]
pub struct RecordingObserver<E> {
    log: Arc<Mutex<Vec<E>>>,
}

impl<E> RecordingObserver<E> {
    /// Creates an observer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of events recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// Returns `true` if nothing has been recorded.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.lock().unwrap().is_empty()
    }
}

impl<E: Clone> RecordingObserver<E> {
    /// Returns a snapshot of every recorded event.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<E> {
        self.log.lock().unwrap().clone()
    }
}

impl<E> Clone for RecordingObserver<E> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<E> Default for RecordingObserver<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Send> Observer<E> for RecordingObserver<E> {
    fn notify(&mut self, event: &E) {
        self.log.lock().unwrap().push(event.clone());
    }
}
