//! Shared test doubles for the Boardwalk engine.

mod clock;
mod observer;
mod rng;

pub use clock::{FixedClock, fixed_clock};
pub use observer::RecordingObserver;
pub use rng::{MockRng, SequenceRng};
