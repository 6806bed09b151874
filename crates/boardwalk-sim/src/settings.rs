//! Host settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use boardwalk_board::config::GameConfig;
use tracing::info;

use crate::error::SimError;

/// Path of an optional YAML [`GameConfig`].
pub const CONFIG_VAR: &str = "BOARDWALK_CONFIG";
/// Number of completed turns after which the host stops.
pub const TURNS_VAR: &str = "BOARDWALK_TURNS";
/// Simulated time per tick, in milliseconds.
pub const TICK_VAR: &str = "BOARDWALK_TICK_MS";
/// Wall-clock time between ticks, in milliseconds. Defaults to the tick.
pub const PACE_VAR: &str = "BOARDWALK_PACE_MS";

/// How the host drives the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimSettings {
    /// YAML game config; the built-in defaults are used when absent.
    pub config_path: Option<PathBuf>,
    /// Completed turns to play before stopping.
    pub turns: u32,
    /// Simulated time passed to every `tick`.
    pub tick: Duration,
    /// Real time between ticks.
    pub pace: Duration,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            config_path: None,
            turns: 10,
            tick: Duration::from_millis(16),
            pace: Duration::from_millis(16),
        }
    }
}

impl SimSettings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, SimError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if a numeric variable does not parse or
    /// the tick is zero.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SimError> {
        let defaults = Self::default();

        let turns = parse_var(&lookup, TURNS_VAR)?.unwrap_or(defaults.turns);
        let tick = parse_var(&lookup, TICK_VAR)?
            .map_or(defaults.tick, Duration::from_millis);
        if tick.is_zero() {
            return Err(SimError::Config(format!("{TICK_VAR} must be positive")));
        }
        let pace = parse_var(&lookup, PACE_VAR)?.map_or(tick, Duration::from_millis);

        Ok(Self {
            config_path: lookup(CONFIG_VAR).map(PathBuf::from),
            turns,
            tick,
            pace,
        })
    }

    /// Loads the game config named by `config_path`, or the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Io` if the file cannot be read and
    /// `SimError::Domain` if it is not a valid config.
    pub async fn load_game_config(&self) -> Result<GameConfig, SimError> {
        let Some(path) = &self.config_path else {
            info!("no {CONFIG_VAR} set, using default game config");
            return Ok(GameConfig::default());
        };

        info!(path = %path.display(), "loading game config");
        let source = tokio::fs::read_to_string(path).await?;
        Ok(GameConfig::from_yaml_str(&source)?)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, SimError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| SimError::Config(format!("{name} must be a number: {e}")))
        })
        .transpose()
}
