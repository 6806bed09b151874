//! The die and its animated reveal.

use std::fmt;
use std::time::Duration;

use boardwalk_core::dispatch::Dispatch;
use boardwalk_core::error::DomainError;
use boardwalk_core::rng::DeterministicRng;
use boardwalk_core::source::EventSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::events::{BoardEventKind, DiceRolled};

/// A face value in `[1, 6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceOutcome(u8);

impl DiceOutcome {
    /// Lowest face.
    pub const MIN: u8 = 1;
    /// Highest face.
    pub const MAX: u8 = 6;

    /// Returns `None` unless `value` is a face of a six-sided die.
    #[must_use]
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// The face value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The face value as a step count for `request_move`.
    #[must_use]
    pub fn steps(self) -> i32 {
        i32::from(self.0)
    }
}

impl TryFrom<u8> for DiceOutcome {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            DomainError::InvalidArgument(format!("dice face must be within 1..=6, got {value}"))
        })
    }
}

impl From<DiceOutcome> for u8 {
    fn from(outcome: DiceOutcome) -> Self {
        outcome.0
    }
}

/// The six face assets the renderer shows, indexed by face value minus one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceSet {
    assets: Vec<String>,
}

impl FaceSet {
    /// Wraps a list of asset names. Checked lazily by [`FaceSet::validate`].
    #[must_use]
    pub fn new(assets: Vec<String>) -> Self {
        Self { assets }
    }

    /// `dice_1` through `dice_6`.
    #[must_use]
    pub fn standard() -> Self {
        Self::new((1..=6).map(|face| format!("dice_{face}")).collect())
    }

    /// Checks that there is exactly one non-blank asset per face.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` describing the first problem found.
    pub fn validate(&self) -> Result<(), DomainError> {
        let expected = usize::from(DiceOutcome::MAX);
        if self.assets.len() != expected {
            return Err(DomainError::Configuration(format!(
                "dice needs {expected} face assets, found {}",
                self.assets.len()
            )));
        }
        if let Some(index) = self.assets.iter().position(|a| a.trim().is_empty()) {
            return Err(DomainError::Configuration(format!(
                "face asset {} is blank",
                index + 1
            )));
        }
        Ok(())
    }

    /// Asset name for `face`, if configured.
    #[must_use]
    pub fn asset(&self, face: DiceOutcome) -> Option<&str> {
        self.assets
            .get(usize::from(face.value() - 1))
            .map(String::as_str)
    }
}

/// Frame-count range and total length of the reveal animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTiming {
    min_roll_count: u32,
    max_roll_count: u32,
    roll_duration: Duration,
}

impl RollTiming {
    /// Creates roll timing parameters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `min_roll_count` is zero or
    /// greater than `max_roll_count`.
    pub fn new(
        min_roll_count: u32,
        max_roll_count: u32,
        roll_duration: Duration,
    ) -> Result<Self, DomainError> {
        if min_roll_count == 0 {
            return Err(DomainError::Configuration(
                "min_roll_count must be at least 1".to_owned(),
            ));
        }
        if min_roll_count > max_roll_count {
            return Err(DomainError::Configuration(format!(
                "min_roll_count ({min_roll_count}) exceeds max_roll_count ({max_roll_count})"
            )));
        }
        Ok(Self {
            min_roll_count,
            max_roll_count,
            roll_duration,
        })
    }

    /// Fewest display frames a reveal shows.
    #[must_use]
    pub fn min_roll_count(&self) -> u32 {
        self.min_roll_count
    }

    /// Most display frames a reveal shows.
    #[must_use]
    pub fn max_roll_count(&self) -> u32 {
        self.max_roll_count
    }

    /// Total reveal length, split evenly between the frames.
    #[must_use]
    pub fn roll_duration(&self) -> Duration {
        self.roll_duration
    }
}

impl Default for RollTiming {
    fn default() -> Self {
        Self {
            min_roll_count: 10,
            max_roll_count: 19,
            roll_duration: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Reveal {
    frames: u32,
    shown_frames: u32,
    interval: Duration,
    accumulated: Duration,
}

/// Single-flight die with a tick-driven reveal.
///
/// `roll` shows the first random display face immediately. Every further
/// `interval = roll_duration / frames` of ticked time shows another one
/// until `frames` have been shown; the next interval lands on the real
/// outcome, which is returned from that `tick` and queued as a
/// [`DiceRolled`] event. At most one frame advances per tick.
pub struct DiceRoller {
    timing: RollTiming,
    faces: FaceSet,
    rng: Box<dyn DeterministicRng>,
    reveal: Option<Reveal>,
    shown: Option<DiceOutcome>,
    uncommitted_events: Vec<BoardEventKind>,
}

impl DiceRoller {
    /// Creates an idle die.
    #[must_use]
    pub fn new(timing: RollTiming, faces: FaceSet, rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            timing,
            faces,
            rng,
            reveal: None,
            shown: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Starts a roll.
    ///
    /// Returns `Dispatch::Ignored` while a previous reveal is still running.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the face set is unusable; no
    /// randomness is drawn and no animation starts.
    pub fn roll(&mut self) -> Result<Dispatch, DomainError> {
        self.faces.validate()?;

        if self.reveal.is_some() {
            debug!("roll ignored: previous roll still animating");
            return Ok(Dispatch::Ignored);
        }

        let frames = self
            .rng
            .next_u32_range(self.timing.min_roll_count, self.timing.max_roll_count)
            .clamp(self.timing.min_roll_count, self.timing.max_roll_count);
        self.shown = Some(self.draw_face());
        self.reveal = Some(Reveal {
            frames,
            shown_frames: 1,
            interval: self.timing.roll_duration / frames,
            accumulated: Duration::ZERO,
        });

        info!(frames, "dice roll started");
        Ok(Dispatch::Started)
    }

    /// Advances the reveal by `elapsed`. Returns the outcome on the tick the
    /// die lands, `None` otherwise.
    pub fn tick(&mut self, elapsed: Duration) -> Option<DiceOutcome> {
        let mut reveal = self.reveal?;

        reveal.accumulated += elapsed;
        if reveal.accumulated < reveal.interval {
            self.reveal = Some(reveal);
            return None;
        }
        reveal.accumulated -= reveal.interval;

        if reveal.shown_frames < reveal.frames {
            reveal.shown_frames += 1;
            self.shown = Some(self.draw_face());
            self.reveal = Some(reveal);
            return None;
        }

        let outcome = self.draw_face();
        self.shown = Some(outcome);
        self.reveal = None;
        info!(outcome = outcome.value(), "dice landed");
        self.uncommitted_events
            .push(BoardEventKind::DiceRolled(DiceRolled {
                outcome,
                frames: reveal.frames,
            }));
        Some(outcome)
    }

    /// Returns `true` while a reveal is in progress.
    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.reveal.is_some()
    }

    /// The face currently on display, if the die has been rolled.
    #[must_use]
    pub fn displayed_face(&self) -> Option<DiceOutcome> {
        self.shown
    }

    /// Asset name of the face currently on display.
    #[must_use]
    pub fn displayed_asset(&self) -> Option<&str> {
        self.shown.and_then(|face| self.faces.asset(face))
    }

    /// The configured face assets.
    #[must_use]
    pub fn faces(&self) -> &FaceSet {
        &self.faces
    }

    /// Abandons any reveal in progress and clears the display.
    pub fn reset(&mut self) {
        self.reveal = None;
        self.shown = None;
        self.uncommitted_events.clear();
    }

    fn draw_face(&mut self) -> DiceOutcome {
        let (min, max) = (u32::from(DiceOutcome::MIN), u32::from(DiceOutcome::MAX));
        let value = self.rng.next_u32_range(min, max);
        debug_assert!(
            (min..=max).contains(&value),
            "rng returned {value} outside {min}..={max}"
        );
        let face = u8::try_from(value.clamp(min, max)).unwrap_or(DiceOutcome::MAX);
        DiceOutcome(face)
    }
}

impl EventSource for DiceRoller {
    type Event = BoardEventKind;

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

impl fmt::Debug for DiceRoller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiceRoller")
            .field("timing", &self.timing)
            .field("faces", &self.faces)
            .field("reveal", &self.reveal)
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}
