//! Components that queue events for their owner to publish.

/// A state machine that records the events produced by its transitions.
///
/// The owner drains the queue after each call and is responsible for
/// stamping and publishing; the component itself never talks to observers.
pub trait EventSource {
    /// The event payload type this component produces.
    type Event;

    /// Returns events produced since the last drain.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears the queue after the owner has published it.
    fn clear_uncommitted_events(&mut self);

    /// Takes every queued event, leaving the queue empty.
    fn drain_events(&mut self) -> Vec<Self::Event>
    where
        Self::Event: Clone,
    {
        let events = self.uncommitted_events().to_vec();
        self.clear_uncommitted_events();
        events
    }
}
