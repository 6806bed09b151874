//! The game session: one context object that owns the board, the die, a
//! coordinator per token and the event bus.
//!
//! The session is the scheduler-facing surface. A roll opens a transaction
//! (dice reveal, then the move of the token whose turn it is, then the
//! landing effect) and every event published during it carries the same
//! correlation id. While a transaction is in flight further rolls and moves
//! are ignored.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use boardwalk_core::clock::Clock;
use boardwalk_core::dispatch::Dispatch;
use boardwalk_core::error::DomainError;
use boardwalk_core::event::{DomainEvent, EventMetadata};
use boardwalk_core::observer::{EventBus, Observer, SubscriptionId};
use boardwalk_core::rng::DeterministicRng;
use boardwalk_core::source::EventSource;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::application::views::{PlayerView, SessionView};
use crate::config::GameConfig;
use crate::domain::dice::{DiceOutcome, DiceRoller, FaceSet};
use crate::domain::events::{BoardEvent, BoardEventKind, GameReset};
use crate::domain::movement::{MovementCoordinator, PlayerState, TokenId, validate_steps};
use crate::domain::topology::{BoardTopology, Point};

/// Owns every piece of game state and publishes what happens to it.
pub struct GameSession {
    board: Arc<BoardTopology>,
    tokens: Vec<MovementCoordinator>,
    dice: DiceRoller,
    clock: Box<dyn Clock>,
    bus: EventBus<BoardEvent>,
    turn: usize,
    sequence: u64,
    correlation: Option<Uuid>,
}

impl GameSession {
    /// Creates a session on `board` with every token idle on cell 0 and the
    /// first token to play.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `config` fails validation.
    pub fn new(
        config: &GameConfig,
        board: BoardTopology,
        faces: FaceSet,
        rng: Box<dyn DeterministicRng>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, DomainError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "game session rejected");
            return Err(e);
        }
        let timing = config.roll_timing()?;

        let board = Arc::new(board);
        let tokens = (0..config.tokens)
            .map(|id| {
                MovementCoordinator::new(
                    TokenId::new(id),
                    Arc::clone(&board),
                    config.effect_cycle.clone(),
                    config.hop_duration(),
                )
            })
            .collect();

        info!(
            cells = board.len(),
            tokens = config.tokens,
            cycle = config.effect_cycle.len(),
            "game session created"
        );
        Ok(Self {
            board,
            tokens,
            dice: DiceRoller::new(timing, faces, rng),
            clock,
            bus: EventBus::new(),
            turn: 0,
            sequence: 0,
            correlation: None,
        })
    }

    /// Creates a session on the reference square layout with the configured
    /// face set.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `config` fails validation.
    pub fn from_config(
        config: &GameConfig,
        rng: Box<dyn DeterministicRng>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let board = config.build_board()?;
        Self::new(config, board, config.faces.clone(), rng, clock)
    }

    /// Rolls the die for the token whose turn it is.
    ///
    /// Returns `Dispatch::Ignored` while a roll or a move is in flight.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the face set is unusable.
    #[instrument(skip(self))]
    pub fn roll(&mut self) -> Result<Dispatch, DomainError> {
        if let Err(e) = self.dice.faces().validate() {
            warn!(error = %e, "roll rejected");
            return Err(e);
        }
        if self.is_busy() {
            debug!("roll ignored: transaction in flight");
            return Ok(Dispatch::Ignored);
        }

        let dispatch = self.dice.roll()?;
        if dispatch.is_started() {
            self.tokens[self.turn].reserve();
            self.open_transaction();
        }
        Ok(dispatch)
    }

    /// Moves the token whose turn it is `steps` cells without rolling.
    ///
    /// Returns `Dispatch::Ignored` while a roll or a move is in flight.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if `steps <= 0`.
    #[instrument(skip(self))]
    pub fn request_move(&mut self, steps: i32) -> Result<Dispatch, DomainError> {
        validate_steps(steps)?;
        if self.is_busy() {
            debug!(steps, "move ignored: transaction in flight");
            return Ok(Dispatch::Ignored);
        }

        let dispatch = self.tokens[self.turn].request_move(steps)?;
        if dispatch.is_started() {
            self.open_transaction();
        }
        Ok(dispatch)
    }

    /// Advances every animation by `elapsed` and publishes what finished.
    ///
    /// Coordinators advance before the die, so a move started by a landing
    /// die begins animating on the following tick.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut finished = Vec::new();
        for coordinator in &mut self.tokens {
            coordinator.tick(elapsed);
            finished.extend(coordinator.drain_events());
        }
        let turn_over = finished
            .iter()
            .any(|kind| matches!(kind, BoardEventKind::MoveCompleted(_)));
        self.publish_all(finished);
        if turn_over {
            self.end_turn();
        }

        let Some(outcome) = self.dice.tick(elapsed) else {
            return;
        };
        let landed = self.dice.drain_events();
        self.publish_all(landed);

        match self.tokens[self.turn].request_move(outcome.steps()) {
            Ok(Dispatch::Started) => {}
            Ok(Dispatch::Ignored) => {
                warn!(outcome = outcome.value(), "rolled move ignored");
                self.tokens[self.turn].release();
                self.correlation = None;
            }
            Err(e) => {
                warn!(error = %e, "rolled move rejected");
                self.tokens[self.turn].release();
                self.correlation = None;
            }
        }
    }

    /// Cancels any roll or move, puts every token back on cell 0 and gives
    /// the turn to the first token. Publishes `GameReset`.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.dice.reset();
        for coordinator in &mut self.tokens {
            coordinator.reset();
        }
        self.turn = 0;
        self.correlation = None;

        info!("game reset");
        let tokens = self.tokens.len();
        self.publish(BoardEventKind::GameReset(GameReset { tokens }));
    }

    /// Snaps the moving token onto its current hop target and publishes
    /// `MoveInterrupted`. The turn does not advance.
    ///
    /// Returns the cell snapped to, or `None` if no token was moving.
    #[cfg(debug_assertions)]
    pub fn force_stop(&mut self) -> Option<usize> {
        let coordinator = self.tokens.iter_mut().find(|c| c.is_busy())?;
        let position = coordinator.force_stop()?;
        let interrupted = coordinator.drain_events();
        self.publish_all(interrupted);
        self.correlation = None;
        Some(position)
    }

    /// Registers an observer for every event published from now on.
    pub fn subscribe(&mut self, observer: Box<dyn Observer<BoardEvent>>) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    /// Removes an observer. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// The token whose turn it is.
    #[must_use]
    pub fn current_token(&self) -> TokenId {
        self.tokens[self.turn].token()
    }

    /// Ring position of the token whose turn it is.
    #[must_use]
    pub fn current_position(&self) -> usize {
        self.tokens[self.turn].current_position()
    }

    /// Ring position of `token`, if it belongs to this session.
    #[must_use]
    pub fn position_of(&self, token: TokenId) -> Option<usize> {
        self.coordinator(token)
            .map(MovementCoordinator::current_position)
    }

    /// State of `token`, if it belongs to this session.
    #[must_use]
    pub fn player(&self, token: TokenId) -> Option<PlayerState> {
        self.coordinator(token).map(MovementCoordinator::state)
    }

    /// State of every token in turn order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerState> {
        self.tokens.iter().map(MovementCoordinator::state).collect()
    }

    /// Returns `true` while a roll or a move is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.dice.is_rolling() || self.tokens.iter().any(MovementCoordinator::is_busy)
    }

    /// The face the die is showing.
    #[must_use]
    pub fn displayed_face(&self) -> Option<DiceOutcome> {
        self.dice.displayed_face()
    }

    /// Where `token` should be drawn right now.
    #[must_use]
    pub fn rendered_position(&self, token: TokenId) -> Option<Point> {
        self.coordinator(token)
            .map(MovementCoordinator::rendered_position)
    }

    /// The board the tokens move on.
    #[must_use]
    pub fn board(&self) -> &BoardTopology {
        &self.board
    }

    /// Serializable snapshot of the whole session.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            current_token: self.current_token(),
            busy: self.is_busy(),
            dice_rolling: self.dice.is_rolling(),
            displayed_face: self.dice.displayed_face(),
            displayed_asset: self.dice.displayed_asset().map(str::to_owned),
            players: self
                .tokens
                .iter()
                .map(|c| PlayerView::new(c.state(), c.rendered_position()))
                .collect(),
            cells: self.board().points().to_vec(),
        }
    }

    fn coordinator(&self, token: TokenId) -> Option<&MovementCoordinator> {
        self.tokens.get(usize::from(token.raw()))
    }

    fn open_transaction(&mut self) {
        let correlation_id = Uuid::new_v4();
        debug!(%correlation_id, token = %self.current_token(), "transaction opened");
        self.correlation = Some(correlation_id);
    }

    fn end_turn(&mut self) {
        self.correlation = None;
        self.turn = (self.turn + 1) % self.tokens.len();
        debug!(next = %self.current_token(), "turn passed");
    }

    fn publish_all(&mut self, kinds: Vec<BoardEventKind>) {
        for kind in kinds {
            self.publish(kind);
        }
    }

    fn publish(&mut self, kind: BoardEventKind) {
        self.sequence += 1;
        let event = BoardEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                sequence_number: self.sequence,
                correlation_id: self.correlation.unwrap_or_else(Uuid::new_v4),
                occurred_at: self.clock.now(),
            },
            kind,
        };
        debug!(
            event_type = event.event_type(),
            sequence_number = self.sequence,
            "event published"
        );
        self.bus.publish(&event);
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("cells", &self.board.len())
            .field("tokens", &self.tokens)
            .field("dice", &self.dice)
            .field("bus", &self.bus)
            .field("turn", &self.turn)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}
