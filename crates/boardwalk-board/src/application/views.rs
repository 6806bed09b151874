//! Read-only views of a running session.
//!
//! These are plain serializable snapshots for renderers and logs; they carry
//! no handle back into the session.

use serde::Serialize;

use crate::domain::dice::DiceOutcome;
use crate::domain::movement::{PlayerState, TokenId};
use crate::domain::topology::Point;

/// One token as a renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// The token.
    pub token: TokenId,
    /// Logical ring position.
    pub position: usize,
    /// `true` while the token is moving.
    pub busy: bool,
    /// Completed laps.
    pub laps: u32,
    /// Interpolated coordinate to draw the token at.
    pub rendered: Point,
}

impl PlayerView {
    pub(crate) fn new(state: PlayerState, rendered: Point) -> Self {
        Self {
            token: state.token,
            position: state.position,
            busy: state.busy,
            laps: state.laps,
            rendered,
        }
    }
}

/// Snapshot of a whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    /// Whose turn it is.
    pub current_token: TokenId,
    /// `true` while a roll or a move is in flight.
    pub busy: bool,
    /// `true` while the dice reveal is running.
    pub dice_rolling: bool,
    /// Face on display, if the die has been rolled since the last reset.
    pub displayed_face: Option<DiceOutcome>,
    /// Asset name of the face on display.
    pub displayed_asset: Option<String>,
    /// Every token in turn order.
    pub players: Vec<PlayerView>,
    /// Cell coordinates in ring order.
    pub cells: Vec<Point>,
}
