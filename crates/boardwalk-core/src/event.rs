//! Event envelope abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every published event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Type name, e.g. `board.move_completed`.
    pub event_type: String,
    /// Monotonically increasing position in the publisher's stream.
    pub sequence_number: u64,
    /// Shared by every event of one roll-and-move transaction.
    pub correlation_id: Uuid,
    /// Timestamp of publication.
    pub occurred_at: DateTime<Utc>,
}

/// Trait that all published events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}
