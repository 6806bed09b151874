//! Game configuration.
//!
//! Every field has a default matching the stock 20-cell board, so a YAML
//! document only needs to name what it changes:
//!
//! ```yaml
//! cells: 28
//! tokens: 2
//! effect_cycle: [draw, sell, sell, sell, event, event, blank]
//! dice:
//!   roll_duration_ms: 600
//! ```

use std::time::Duration;

use boardwalk_core::error::DomainError;
use serde::{Deserialize, Serialize};

use crate::domain::dice::{FaceSet, RollTiming};
use crate::domain::effects::EffectCycle;
use crate::domain::topology::BoardTopology;
use crate::layout;

/// Reveal animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiceConfig {
    /// Fewest display frames per roll.
    pub min_roll_count: u32,
    /// Most display frames per roll.
    pub max_roll_count: u32,
    /// Total reveal length in milliseconds.
    pub roll_duration_ms: u64,
}

impl Default for DiceConfig {
    fn default() -> Self {
        let timing = RollTiming::default();
        Self {
            min_roll_count: timing.min_roll_count(),
            max_roll_count: timing.max_roll_count(),
            roll_duration_ms: 1_000,
        }
    }
}

/// Extent of the rectangle the reference layout places cells on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
        }
    }
}

/// Complete session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Number of cells on the ring.
    pub cells: usize,
    /// Number of player tokens taking turns.
    pub tokens: u8,
    /// Length of one hop in milliseconds.
    pub hop_duration_ms: u64,
    /// Reveal animation settings.
    pub dice: DiceConfig,
    /// Effects repeated around the ring.
    pub effect_cycle: EffectCycle,
    /// Face assets for the dice display.
    pub faces: FaceSet,
    /// Reference layout extent.
    pub layout: LayoutConfig,
    /// RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cells: 20,
            tokens: 1,
            hop_duration_ms: 200,
            dice: DiceConfig::default(),
            effect_cycle: EffectCycle::canonical(),
            faces: FaceSet::standard(),
            layout: LayoutConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if the document does not parse or
    /// fails [`GameConfig::validate`].
    pub fn from_yaml_str(source: &str) -> Result<Self, DomainError> {
        let config: Self = serde_yaml::from_str(source)
            .map_err(|e| DomainError::Configuration(format!("invalid game config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings the session depends on at construction.
    ///
    /// The face set is deliberately not checked here: a bad face set only
    /// disables rolling, and is reported by the roll itself.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` for an empty board, zero tokens
    /// or inconsistent roll counts.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.cells == 0 {
            return Err(DomainError::Configuration(
                "board must have at least one cell".to_owned(),
            ));
        }
        if self.tokens == 0 {
            return Err(DomainError::Configuration(
                "at least one token is required".to_owned(),
            ));
        }
        self.roll_timing()?;
        Ok(())
    }

    /// Roll timing built from [`DiceConfig`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` for inconsistent roll counts.
    pub fn roll_timing(&self) -> Result<RollTiming, DomainError> {
        RollTiming::new(
            self.dice.min_roll_count,
            self.dice.max_roll_count,
            Duration::from_millis(self.dice.roll_duration_ms),
        )
    }

    /// Length of one hop.
    #[must_use]
    pub fn hop_duration(&self) -> Duration {
        Duration::from_millis(self.hop_duration_ms)
    }

    /// Lays the configured number of cells out with the reference generator.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `cells` is zero.
    pub fn build_board(&self) -> Result<BoardTopology, DomainError> {
        BoardTopology::new(layout::square_ring(
            self.cells,
            self.layout.width,
            self.layout.height,
        ))
    }
}
