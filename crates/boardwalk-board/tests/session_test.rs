//! Integration tests for the game session: roll transactions, turn order,
//! ignored requests and restarts.

mod common;

use std::sync::mpsc;

use boardwalk_board::application::session::GameSession;
use boardwalk_board::config::GameConfig;
use boardwalk_board::domain::dice::FaceSet;
use boardwalk_board::domain::effects::CellEffect;
use boardwalk_board::domain::events::{
    BoardEventKind, CELL_EFFECT_RESOLVED_EVENT_TYPE, DICE_ROLLED_EVENT_TYPE, GAME_RESET_EVENT_TYPE,
    LAP_COMPLETED_EVENT_TYPE, MOVE_COMPLETED_EVENT_TYPE,
};
use boardwalk_board::domain::movement::TokenId;
use boardwalk_core::clock::Clock;
use boardwalk_core::dispatch::Dispatch;
use boardwalk_core::error::DomainError;
use boardwalk_core::event::DomainEvent;
use boardwalk_test_support::{MockRng, SequenceRng, fixed_clock};

use common::{FRAME, HOP, event_types, pick, quick_config, recorded_session, run_until_idle};

#[test]
fn test_roll_transaction_publishes_in_order_with_shared_correlation() {
    let (mut session, recorder) = recorded_session(&quick_config(1), vec![1, 4, 5]);

    assert_eq!(session.roll().unwrap(), Dispatch::Started);
    run_until_idle(&mut session, HOP);

    let events = recorder.events();
    assert_eq!(
        event_types(&events),
        vec![
            DICE_ROLLED_EVENT_TYPE,
            MOVE_COMPLETED_EVENT_TYPE,
            CELL_EFFECT_RESOLVED_EVENT_TYPE,
        ]
    );

    let correlation_id = events[0].metadata.correlation_id;
    for (index, event) in events.iter().enumerate() {
        assert_eq!(event.metadata.correlation_id, correlation_id);
        assert_eq!(event.metadata.sequence_number, index as u64 + 1);
        assert_eq!(event.metadata.event_type, event.event_type());
        assert_eq!(event.metadata.occurred_at, fixed_clock().now());
    }

    let BoardEventKind::DiceRolled(rolled) = &events[0].kind else {
        panic!("expected DiceRolled, got {:?}", events[0].kind);
    };
    assert_eq!(rolled.outcome.value(), 5);
    assert_eq!(rolled.frames, 1);
    assert_eq!(events[0].to_payload()["DiceRolled"]["outcome"], 5);

    let BoardEventKind::CellEffectResolved(resolved) = &events[2].kind else {
        panic!("expected CellEffectResolved, got {:?}", events[2].kind);
    };
    assert_eq!(resolved.position, 5);
    assert_eq!(resolved.effect, CellEffect::Normal);
    assert_eq!(session.current_position(), 5);
}

#[test]
fn test_each_roll_gets_its_own_correlation_id() {
    let (mut session, recorder) = recorded_session(&quick_config(1), vec![1, 4, 5, 1, 2, 2]);

    session.roll().unwrap();
    run_until_idle(&mut session, HOP);
    session.roll().unwrap();
    run_until_idle(&mut session, HOP);

    let events = recorder.events();
    assert_eq!(events.len(), 6);
    assert_ne!(
        events[0].metadata.correlation_id,
        events[3].metadata.correlation_id
    );
    assert_eq!(events[5].metadata.sequence_number, 6);

    let effects = pick(&events, |kind| match kind {
        BoardEventKind::CellEffectResolved(e) => Some((e.position, e.effect)),
        _ => None,
    });
    assert_eq!(
        effects,
        vec![(5, CellEffect::Normal), (7, CellEffect::Penalty)]
    );
}

#[test]
fn test_default_reveal_lands_after_one_second() {
    let config = GameConfig::default();
    let mut session =
        GameSession::from_config(&config, Box::new(MockRng), Box::new(fixed_clock())).unwrap();
    let (sender, receiver) = mpsc::channel();
    session.subscribe(Box::new(sender));

    session.roll().unwrap();
    for _ in 0..9 {
        session.tick(FRAME);
    }
    assert!(receiver.try_recv().is_err(), "die must not land early");

    session.tick(FRAME);
    let landed = receiver.try_recv().unwrap();
    let BoardEventKind::DiceRolled(rolled) = landed.kind else {
        panic!("expected DiceRolled, got {:?}", landed.kind);
    };
    assert_eq!(rolled.frames, 10);
    assert_eq!(rolled.outcome.value(), 1);
    assert!(session.is_busy(), "rolled move starts as the die lands");
}

#[test]
fn test_rolling_token_stays_busy_for_the_whole_transaction() {
    let (mut session, _recorder) = recorded_session(&quick_config(2), vec![1, 4, 3]);
    let roller = session.current_token();
    let waiting = TokenId::new(1);

    session.roll().unwrap();

    let mut ticks = 0;
    while session.is_busy() {
        assert!(session.player(roller).unwrap().busy, "tick {ticks}");
        assert!(session.view().players[0].busy, "tick {ticks}");
        assert!(!session.player(waiting).unwrap().busy, "tick {ticks}");
        session.tick(HOP);
        ticks += 1;
    }

    assert_eq!(ticks, 4, "one landing tick and three hops");
    assert!(session.players().iter().all(|p| !p.busy));
    assert_eq!(session.position_of(roller), Some(3));
}

#[test]
fn test_reset_during_reveal_clears_busy_token() {
    let (mut session, _recorder) = recorded_session(&quick_config(1), vec![1, 4, 3]);
    session.roll().unwrap();

    session.reset();

    assert!(!session.player(TokenId::new(0)).unwrap().busy);
    assert!(!session.is_busy());
}

#[test]
fn test_ignored_requests_publish_nothing() {
    let (mut session, recorder) = recorded_session(&quick_config(1), vec![1, 4, 2]);

    session.roll().unwrap();
    assert_eq!(session.roll().unwrap(), Dispatch::Ignored);
    assert_eq!(session.request_move(4).unwrap(), Dispatch::Ignored);
    session.tick(HOP);
    assert_eq!(session.roll().unwrap(), Dispatch::Ignored);
    run_until_idle(&mut session, HOP);

    assert_eq!(recorder.len(), 3);
    assert_eq!(session.current_position(), 2);
}

#[test]
fn test_second_move_request_does_not_disturb_first() {
    let (mut session, recorder) = recorded_session(&quick_config(1), vec![]);

    assert_eq!(session.request_move(3).unwrap(), Dispatch::Started);
    assert_eq!(session.request_move(2).unwrap(), Dispatch::Ignored);
    run_until_idle(&mut session, HOP);

    let moves = pick(&recorder.events(), |kind| match kind {
        BoardEventKind::MoveCompleted(m) => Some((m.from, m.steps, m.position)),
        _ => None,
    });
    assert_eq!(moves, vec![(0, 3, 3)]);
    assert_eq!(session.current_position(), 3);
}

#[test]
fn test_invalid_steps_leave_state_unchanged() {
    let (mut session, recorder) = recorded_session(&quick_config(1), vec![]);

    for steps in [0, -1] {
        match session.request_move(steps) {
            Err(DomainError::InvalidArgument(msg)) => assert!(msg.contains("positive")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    assert!(!session.is_busy());
    assert_eq!(session.current_position(), 0);
    assert!(recorder.is_empty());
}

#[test]
fn test_turns_rotate_round_robin() {
    let (mut session, _recorder) =
        recorded_session(&quick_config(2), vec![1, 1, 3, 1, 1, 5, 1, 1, 2]);

    assert_eq!(session.current_token(), TokenId::new(0));
    session.roll().unwrap();
    run_until_idle(&mut session, HOP);

    assert_eq!(session.current_token(), TokenId::new(1));
    session.roll().unwrap();
    run_until_idle(&mut session, HOP);

    assert_eq!(session.current_token(), TokenId::new(0));
    session.roll().unwrap();
    run_until_idle(&mut session, HOP);

    assert_eq!(session.position_of(TokenId::new(0)), Some(5));
    assert_eq!(session.position_of(TokenId::new(1)), Some(5));
    assert_eq!(session.current_token(), TokenId::new(1));
}

#[test]
fn test_wrapping_move_reports_lap_after_effect() {
    let (mut session, recorder) = recorded_session(&quick_config(1), vec![]);

    session.request_move(18).unwrap();
    run_until_idle(&mut session, HOP);
    session.request_move(5).unwrap();
    run_until_idle(&mut session, HOP);

    let events = recorder.events();
    assert_eq!(
        event_types(&events[2..]),
        vec![
            MOVE_COMPLETED_EVENT_TYPE,
            CELL_EFFECT_RESOLVED_EVENT_TYPE,
            LAP_COMPLETED_EVENT_TYPE,
        ]
    );
    let BoardEventKind::MoveCompleted(completed) = &events[2].kind else {
        panic!("expected MoveCompleted, got {:?}", events[2].kind);
    };
    assert_eq!((completed.from, completed.position), (18, 3));
    assert_eq!(session.player(TokenId::new(0)).unwrap().laps, 1);
}

#[test]
fn test_reset_mid_move_returns_everything_to_start() {
    let (mut session, recorder) = recorded_session(&quick_config(2), vec![1, 6, 4]);

    session.roll().unwrap();
    session.tick(HOP);
    session.tick(HOP);
    assert!(session.is_busy());

    session.reset();

    assert!(!session.is_busy());
    assert_eq!(session.current_token(), TokenId::new(0));
    assert_eq!(session.displayed_face(), None);
    assert!(session.players().iter().all(|p| p.position == 0 && !p.busy));

    let events = recorder.events();
    assert_eq!(
        event_types(&events),
        vec![DICE_ROLLED_EVENT_TYPE, GAME_RESET_EVENT_TYPE]
    );
    let BoardEventKind::GameReset(reset) = &events[1].kind else {
        panic!("expected GameReset, got {:?}", events[1].kind);
    };
    assert_eq!(reset.tokens, 2);

    for _ in 0..10 {
        session.tick(HOP);
    }
    assert_eq!(recorder.len(), 2, "cancelled move must not complete");
}

#[test]
fn test_bad_face_set_disables_rolling() {
    let mut config = quick_config(1);
    config.faces = FaceSet::new(vec!["dice_1".to_owned()]);
    let mut session = GameSession::from_config(
        &config,
        Box::new(SequenceRng::new(vec![])),
        Box::new(fixed_clock()),
    )
    .unwrap();

    match session.roll() {
        Err(DomainError::Configuration(msg)) => {
            assert_eq!(msg, "dice needs 6 face assets, found 1");
        }
        other => panic!("expected Configuration, got {other:?}"),
    }
    assert!(!session.is_busy());
    assert_eq!(session.request_move(2).unwrap(), Dispatch::Started);
}

#[test]
fn test_unsubscribed_observer_stops_receiving() {
    let (mut session, _recorder) = recorded_session(&quick_config(1), vec![]);
    let (sender, receiver) = mpsc::channel();
    let id = session.subscribe(Box::new(sender));

    session.request_move(1).unwrap();
    run_until_idle(&mut session, HOP);
    assert_eq!(receiver.try_iter().count(), 2);

    assert!(session.unsubscribe(id));
    assert!(!session.unsubscribe(id));
    session.request_move(1).unwrap();
    run_until_idle(&mut session, HOP);
    assert_eq!(receiver.try_iter().count(), 0);
}

#[test]
fn test_market_cycle_from_yaml() {
    let config = GameConfig::from_yaml_str(
        "effect_cycle: [draw, sell, sell, sell, event, event, blank]\n",
    )
    .unwrap();
    let (mut session, recorder) = recorded_session(&config, vec![]);

    session.request_move(13).unwrap();
    run_until_idle(&mut session, HOP);

    let effects = pick(&recorder.events(), |kind| match kind {
        BoardEventKind::CellEffectResolved(e) => Some(e.effect),
        _ => None,
    });
    assert_eq!(effects, vec![CellEffect::Blank]);
}
