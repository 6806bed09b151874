//! Cell effects and the cycle that assigns them to ring positions.

use boardwalk_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Categorical outcome of landing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellEffect {
    /// Nothing happens.
    Normal,
    /// The player gains something.
    Bonus,
    /// The player loses something.
    Penalty,
    /// A chance card is drawn.
    Chance,
    /// A fate card is drawn.
    Fate,
    /// Market board: draw a card.
    Draw,
    /// Market board: sell from the hand.
    Sell,
    /// Market board: a random event fires.
    Event,
    /// Market board: empty cell.
    Blank,
}

/// Ordered list of effects repeated around the ring.
///
/// `resolve(p) = cycle[p mod len]`. The cycle is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CellEffect>", into = "Vec<CellEffect>")]
pub struct EffectCycle {
    effects: Vec<CellEffect>,
}

impl EffectCycle {
    /// Builds a cycle from an ordered list of effects.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `effects` is empty.
    pub fn new(effects: Vec<CellEffect>) -> Result<Self, DomainError> {
        if effects.is_empty() {
            return Err(DomainError::Configuration(
                "effect cycle must not be empty".to_owned(),
            ));
        }
        Ok(Self { effects })
    }

    /// `[Normal, Bonus, Penalty, Chance, Fate]`.
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            effects: vec![
                CellEffect::Normal,
                CellEffect::Bonus,
                CellEffect::Penalty,
                CellEffect::Chance,
                CellEffect::Fate,
            ],
        }
    }

    /// `[Draw, Sell, Sell, Sell, Event, Event, Blank]`.
    #[must_use]
    pub fn market() -> Self {
        Self {
            effects: vec![
                CellEffect::Draw,
                CellEffect::Sell,
                CellEffect::Sell,
                CellEffect::Sell,
                CellEffect::Event,
                CellEffect::Event,
                CellEffect::Blank,
            ],
        }
    }

    /// Effect of the cell at `position`.
    #[must_use]
    pub fn resolve(&self, position: usize) -> CellEffect {
        self.effects[position % self.effects.len()]
    }

    /// Length of the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Always `false`: construction rejects empty cycles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for EffectCycle {
    fn default() -> Self {
        Self::canonical()
    }
}

impl TryFrom<Vec<CellEffect>> for EffectCycle {
    type Error = DomainError;

    fn try_from(effects: Vec<CellEffect>) -> Result<Self, Self::Error> {
        Self::new(effects)
    }
}

impl From<EffectCycle> for Vec<CellEffect> {
    fn from(cycle: EffectCycle) -> Self {
        cycle.effects
    }
}
