//! Boardwalk simulation entry point.

use std::error::Error;

use boardwalk_board::application::session::GameSession;
use boardwalk_core::clock::SystemClock;
use boardwalk_core::rng::{DeterministicRng, SeededRng};
use boardwalk_sim::runner;
use boardwalk_sim::settings::SimSettings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Boardwalk simulation");

    let settings = SimSettings::from_env()?;
    let config = settings.load_game_config().await?;

    let rng: Box<dyn DeterministicRng> = match config.seed {
        Some(seed) => Box::new(SeededRng::new(seed)),
        None => Box::new(SeededRng::from_entropy()),
    };
    let session = GameSession::from_config(&config, rng, Box::new(SystemClock))?;

    let summary = runner::run(session, &settings).await?;
    for player in &summary.players {
        tracing::info!(
            token = %player.token,
            position = player.position,
            laps = player.laps,
            "final position"
        );
    }

    Ok(())
}
