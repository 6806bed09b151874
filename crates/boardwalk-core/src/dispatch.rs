//! Outcome of a request made to a single-flight component.

/// What happened to a roll or move request that passed validation.
///
/// A request issued while the component is already busy is dropped rather
/// than queued. That is not an error, so it is reported here instead of
/// through `DomainError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The request was accepted and its animation has begun.
    Started,
    /// The request arrived while another one was in flight and was dropped.
    Ignored,
}

impl Dispatch {
    /// Returns `true` if the request was accepted.
    #[must_use]
    pub fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }
}
