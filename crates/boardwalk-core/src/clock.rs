//! Wall-clock source for event timestamps.
//!
//! The engine reads the clock in one place: the session stamps
//! `EventMetadata::occurred_at` when it publishes. Tests inject a fixed
//! clock so published events compare equal across runs.

use chrono::{DateTime, Utc};

/// Abstraction over wall-clock time, used to stamp published events.
///
/// Animation timing never reads the clock; it is driven by the elapsed
/// durations handed to `tick`.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
