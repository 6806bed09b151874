//! Events published by the board engine.

use boardwalk_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::dice::DiceOutcome;
use super::effects::CellEffect;
use super::movement::TokenId;

/// Event type name for [`DiceRolled`].
pub const DICE_ROLLED_EVENT_TYPE: &str = "board.dice_rolled";
/// Event type name for [`MoveCompleted`].
pub const MOVE_COMPLETED_EVENT_TYPE: &str = "board.move_completed";
/// Event type name for [`CellEffectResolved`].
pub const CELL_EFFECT_RESOLVED_EVENT_TYPE: &str = "board.cell_effect_resolved";
/// Event type name for [`LapCompleted`].
pub const LAP_COMPLETED_EVENT_TYPE: &str = "board.lap_completed";
/// Event type name for [`MoveInterrupted`].
pub const MOVE_INTERRUPTED_EVENT_TYPE: &str = "board.move_interrupted";
/// Event type name for [`GameReset`].
pub const GAME_RESET_EVENT_TYPE: &str = "board.game_reset";

/// Emitted once when a roll's reveal animation finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRolled {
    /// The face the die landed on.
    pub outcome: DiceOutcome,
    /// How many display frames the reveal showed before landing.
    pub frames: u32,
}

/// Emitted once when a token finishes its last hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCompleted {
    /// The token that moved.
    pub token: TokenId,
    /// Position before the move.
    pub from: usize,
    /// Number of hops taken.
    pub steps: u32,
    /// Position after the move.
    pub position: usize,
}

/// Emitted right after [`MoveCompleted`] with the effect of the landing cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEffectResolved {
    /// The token that landed.
    pub token: TokenId,
    /// The landing position.
    pub position: usize,
    /// The resolved effect.
    pub effect: CellEffect,
}

/// Emitted when a move carried the token past the last cell back to cell 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapCompleted {
    /// The token that lapped.
    pub token: TokenId,
    /// Total laps completed by this token since the game started.
    pub laps: u32,
}

/// Emitted instead of a completion when a move is force-stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInterrupted {
    /// The token that was stopped.
    pub token: TokenId,
    /// The cell it was snapped to.
    pub position: usize,
}

/// Emitted when the session restarts the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReset {
    /// Number of tokens returned to the start cell.
    pub tokens: usize,
}

/// Event payload variants for the board engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEventKind {
    /// The die landed.
    DiceRolled(DiceRolled),
    /// A token finished moving.
    MoveCompleted(MoveCompleted),
    /// The landing cell's effect was resolved.
    CellEffectResolved(CellEffectResolved),
    /// A token passed the start cell.
    LapCompleted(LapCompleted),
    /// A move was force-stopped.
    MoveInterrupted(MoveInterrupted),
    /// The game was restarted.
    GameReset(GameReset),
}

impl BoardEventKind {
    /// Type name used in event metadata.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DiceRolled(_) => DICE_ROLLED_EVENT_TYPE,
            Self::MoveCompleted(_) => MOVE_COMPLETED_EVENT_TYPE,
            Self::CellEffectResolved(_) => CELL_EFFECT_RESOLVED_EVENT_TYPE,
            Self::LapCompleted(_) => LAP_COMPLETED_EVENT_TYPE,
            Self::MoveInterrupted(_) => MOVE_INTERRUPTED_EVENT_TYPE,
            Self::GameReset(_) => GAME_RESET_EVENT_TYPE,
        }
    }
}

/// Published event envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: BoardEventKind,
}

impl DomainEvent for BoardEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("BoardEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
