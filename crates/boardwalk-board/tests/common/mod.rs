//! Shared helpers for board integration tests.
#![allow(dead_code)]

use std::time::Duration;

use boardwalk_board::application::session::GameSession;
use boardwalk_board::config::GameConfig;
use boardwalk_board::domain::events::{BoardEvent, BoardEventKind};
use boardwalk_test_support::{RecordingObserver, SequenceRng, fixed_clock};

/// One dice frame with [`quick_config`].
pub const FRAME: Duration = Duration::from_millis(100);

/// One hop with the default hop duration.
pub const HOP: Duration = Duration::from_millis(200);

/// Default board with a single-frame, 100 ms reveal, so a scripted roll is
/// `[frames, first face, outcome]` and lands on the first tick.
pub fn quick_config(tokens: u8) -> GameConfig {
    let mut config = GameConfig {
        tokens,
        ..GameConfig::default()
    };
    config.dice.min_roll_count = 1;
    config.dice.max_roll_count = 1;
    config.dice.roll_duration_ms = 100;
    config
}

/// Builds a session on `config` with a scripted RNG and a recording
/// observer already subscribed.
pub fn recorded_session(
    config: &GameConfig,
    script: Vec<u32>,
) -> (GameSession, RecordingObserver<BoardEvent>) {
    let mut session = GameSession::from_config(
        config,
        Box::new(SequenceRng::new(script)),
        Box::new(fixed_clock()),
    )
    .unwrap();
    let recorder = RecordingObserver::new();
    session.subscribe(Box::new(recorder.clone()));
    (session, recorder)
}

/// Ticks by `step` until the session is idle. Returns the number of ticks.
///
/// # Panics
///
/// Panics if the session is still busy after 10 000 ticks.
pub fn run_until_idle(session: &mut GameSession, step: Duration) -> usize {
    let mut ticks = 0;
    while session.is_busy() {
        session.tick(step);
        ticks += 1;
        assert!(ticks < 10_000, "session never went idle");
    }
    ticks
}

/// Event type names in publish order.
pub fn event_types(events: &[BoardEvent]) -> Vec<&'static str> {
    events.iter().map(|e| e.kind.event_type()).collect()
}

/// Events of one kind, unwrapped with `pick`.
pub fn pick<T>(events: &[BoardEvent], pick: impl Fn(&BoardEventKind) -> Option<T>) -> Vec<T> {
    events.iter().filter_map(|e| pick(&e.kind)).collect()
}
