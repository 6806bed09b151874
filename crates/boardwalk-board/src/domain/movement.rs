//! Token movement around the ring.
//!
//! [`MovementCoordinator`] is the single writer of one token's
//! [`PlayerState`]. A move is a sequence of hops, one cell each, animated by
//! interpolating the rendered coordinate over a fixed hop duration. The
//! owning scheduler advances it with `tick`.

use std::sync::Arc;
use std::time::Duration;

use boardwalk_core::dispatch::Dispatch;
use boardwalk_core::error::DomainError;
use boardwalk_core::source::EventSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::effects::EffectCycle;
use super::events::{BoardEventKind, CellEffectResolved, LapCompleted, MoveCompleted};
use super::topology::{BoardTopology, Point};

/// Identifies a player token within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u8);

impl TokenId {
    /// Creates a token id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Snapshot of one token's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// The token this state belongs to.
    pub token: TokenId,
    /// Current ring position, always `< N`.
    pub position: usize,
    /// `true` from the roll that starts the token's turn (or from a direct
    /// move request) until the move finishes.
    pub busy: bool,
    /// Number of times the token has passed from the last cell to cell 0.
    pub laps: u32,
}

/// Checks a requested step count.
///
/// # Errors
///
/// Returns `DomainError::InvalidArgument` if `steps <= 0`.
pub fn validate_steps(steps: i32) -> Result<u32, DomainError> {
    u32::try_from(steps)
        .ok()
        .filter(|steps| *steps > 0)
        .ok_or_else(|| DomainError::InvalidArgument(format!("steps must be positive, got {steps}")))
}

/// The move in flight.
#[derive(Debug, Clone, Copy)]
struct Transit {
    origin: usize,
    steps: u32,
    /// 1-based index of the hop being animated.
    hop: u32,
    from: Point,
    to: Point,
    elapsed: Duration,
}

/// Moves one token around the ring, one animated hop per cell.
///
/// Idle → (`reserve`) → Reserved → (`request_move`, steps > 0) → Moving →
/// (last hop done) → Idle. A reserved token reports busy while its roll is
/// revealed; `release` returns it to Idle without moving.
///
/// Finishing a move queues [`MoveCompleted`], then [`CellEffectResolved`],
/// then [`LapCompleted`] if the move wrapped.
#[derive(Debug)]
pub struct MovementCoordinator {
    state: PlayerState,
    board: Arc<BoardTopology>,
    effects: EffectCycle,
    hop_duration: Duration,
    rendered: Point,
    transit: Option<Transit>,
    uncommitted_events: Vec<BoardEventKind>,
}

impl MovementCoordinator {
    /// Creates an idle coordinator with its token on cell 0.
    #[must_use]
    pub fn new(
        token: TokenId,
        board: Arc<BoardTopology>,
        effects: EffectCycle,
        hop_duration: Duration,
    ) -> Self {
        let rendered = board.point_after(0, 0);
        Self {
            state: PlayerState {
                token,
                position: 0,
                busy: false,
                laps: 0,
            },
            board,
            effects,
            hop_duration,
            rendered,
            transit: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Starts moving `steps` cells forward.
    ///
    /// Returns `Dispatch::Ignored` if a move is already in flight; the
    /// running move is unaffected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `steps <= 0`. Nothing is
    /// mutated.
    pub fn request_move(&mut self, steps: i32) -> Result<Dispatch, DomainError> {
        let steps = validate_steps(steps)?;

        if self.transit.is_some() {
            debug!(token = %self.state.token, steps, "move ignored: token already moving");
            return Ok(Dispatch::Ignored);
        }

        let origin = self.state.position;
        self.state.busy = true;
        self.transit = Some(Transit {
            origin,
            steps,
            hop: 1,
            from: self.rendered,
            to: self.board.point_after(origin, 1),
            elapsed: Duration::ZERO,
        });

        info!(token = %self.state.token, origin, steps, "move started");
        Ok(Dispatch::Started)
    }

    /// Advances the animation by `elapsed`.
    ///
    /// Time beyond the end of a hop carries into the next one, but at most
    /// one hop completes per tick so every cell on the path is rendered.
    pub fn tick(&mut self, elapsed: Duration) {
        let Some(mut transit) = self.transit else {
            return;
        };

        transit.elapsed += elapsed;
        if transit.elapsed < self.hop_duration {
            let t = transit.elapsed.as_secs_f32() / self.hop_duration.as_secs_f32();
            self.rendered = transit.from.lerp(transit.to, t);
            self.transit = Some(transit);
            return;
        }

        self.rendered = transit.to;
        if transit.hop == transit.steps {
            self.finish(transit);
            return;
        }

        transit.elapsed -= self.hop_duration;
        transit.hop += 1;
        transit.from = transit.to;
        transit.to = self
            .board
            .point_after(transit.origin, transit.hop as usize);
        self.transit = Some(transit);
    }

    fn finish(&mut self, transit: Transit) {
        let n = self.board.len();
        let travelled = transit.origin + transit.steps as usize;
        let position = travelled % n;
        #[allow(clippy::cast_possible_truncation)]
        let laps_gained = (travelled / n) as u32;

        self.state.position = position;
        self.state.busy = false;
        self.state.laps += laps_gained;
        self.transit = None;

        let token = self.state.token;
        let effect = self.effects.resolve(position);
        info!(%token, position, ?effect, "move completed");

        self.uncommitted_events
            .push(BoardEventKind::MoveCompleted(MoveCompleted {
                token,
                from: transit.origin,
                steps: transit.steps,
                position,
            }));
        self.uncommitted_events
            .push(BoardEventKind::CellEffectResolved(CellEffectResolved {
                token,
                position,
                effect,
            }));
        if laps_gained > 0 {
            self.uncommitted_events
                .push(BoardEventKind::LapCompleted(LapCompleted {
                    token,
                    laps: self.state.laps,
                }));
        }
    }

    /// Snaps the token onto the target cell of the hop in flight and returns
    /// to Idle without completing the move.
    ///
    /// Diagnostics only; normal play never cancels a move. Queues a
    /// `MoveInterrupted` event and returns the cell snapped to, or `None` if
    /// the token was idle.
    #[cfg(debug_assertions)]
    pub fn force_stop(&mut self) -> Option<usize> {
        use super::events::MoveInterrupted;

        let transit = self.transit.take()?;
        let position = self.board.wrap(transit.origin, transit.hop as usize);

        self.rendered = transit.to;
        self.state.position = position;
        self.state.busy = false;

        tracing::warn!(token = %self.state.token, position, "move force-stopped");
        self.uncommitted_events
            .push(BoardEventKind::MoveInterrupted(MoveInterrupted {
                token: self.state.token,
                position,
            }));
        Some(position)
    }

    /// Marks the token busy ahead of a move whose step count is not known
    /// yet. No effect while a move is in flight.
    pub fn reserve(&mut self) {
        if self.transit.is_none() {
            self.state.busy = true;
        }
    }

    /// Drops a reservation that will not turn into a move. No effect while a
    /// move is in flight.
    pub fn release(&mut self) {
        if self.transit.is_none() {
            self.state.busy = false;
        }
    }

    /// Returns the token to cell 0, idle, with no laps.
    pub fn reset(&mut self) {
        self.state.position = 0;
        self.state.busy = false;
        self.state.laps = 0;
        self.transit = None;
        self.rendered = self.board.point_after(0, 0);
        self.uncommitted_events.clear();
    }

    /// The token this coordinator moves.
    #[must_use]
    pub fn token(&self) -> TokenId {
        self.state.token
    }

    /// Current ring position.
    #[must_use]
    pub fn current_position(&self) -> usize {
        self.state.position
    }

    /// Returns `true` while a move is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    /// Copy of the token's state.
    #[must_use]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Where the token should be drawn right now.
    #[must_use]
    pub fn rendered_position(&self) -> Point {
        self.rendered
    }

    /// Target cell of the hop being animated, if moving.
    #[must_use]
    pub fn hop_target(&self) -> Option<usize> {
        self.transit
            .map(|transit| self.board.wrap(transit.origin, transit.hop as usize))
    }
}

impl EventSource for MovementCoordinator {
    type Event = BoardEventKind;

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
