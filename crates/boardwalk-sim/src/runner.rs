//! The scheduler loop.

use std::sync::mpsc;

use boardwalk_board::application::session::GameSession;
use boardwalk_board::domain::events::{BoardEvent, BoardEventKind};
use boardwalk_board::domain::movement::PlayerState;
use boardwalk_core::event::DomainEvent;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

use crate::error::SimError;
use crate::settings::SimSettings;

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Completed turns.
    pub turns: u32,
    /// Ticks driven.
    pub ticks: u64,
    /// Events published.
    pub events: usize,
    /// Final state of every token.
    pub players: Vec<PlayerState>,
}

/// Plays `session` until `settings.turns` moves have completed, rolling
/// whenever it goes idle.
///
/// # Errors
///
/// Returns `SimError::Domain` if the session refuses to roll.
pub async fn run(mut session: GameSession, settings: &SimSettings) -> Result<RunSummary, SimError> {
    let (sender, receiver) = mpsc::channel::<BoardEvent>();
    let subscription = session.subscribe(Box::new(sender));

    let mut interval = time::interval(settings.pace);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut turns = 0;
    let mut ticks = 0;
    let mut events = 0;
    while turns < settings.turns {
        if !session.is_busy() {
            session.roll()?;
        }

        interval.tick().await;
        session.tick(settings.tick);
        ticks += 1;

        for event in receiver.try_iter() {
            events += 1;
            if matches!(event.kind, BoardEventKind::MoveCompleted(_)) {
                turns += 1;
            }
            log_event(&event);
        }
    }

    session.unsubscribe(subscription);
    info!(turns, ticks, events, "simulation finished");
    Ok(RunSummary {
        turns,
        ticks,
        events,
        players: session.players(),
    })
}

fn log_event(event: &BoardEvent) {
    let meta = event.metadata();
    info!(
        event_type = event.event_type(),
        sequence_number = meta.sequence_number,
        correlation_id = %meta.correlation_id,
        payload = %event.to_payload(),
        "board event"
    );
}
