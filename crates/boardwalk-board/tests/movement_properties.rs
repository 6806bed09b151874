//! Property tests for token movement around the ring.

use std::sync::Arc;
use std::time::Duration;

use boardwalk_board::domain::effects::EffectCycle;
use boardwalk_board::domain::events::BoardEventKind;
use boardwalk_board::domain::movement::{MovementCoordinator, TokenId};
use boardwalk_board::domain::topology::BoardTopology;
use boardwalk_board::layout::square_ring;
use boardwalk_core::dispatch::Dispatch;
use boardwalk_core::source::EventSource;
use proptest::prelude::*;

const HOP: Duration = Duration::from_millis(200);

fn coordinator_at(cells: usize, start: usize) -> MovementCoordinator {
    let board = Arc::new(BoardTopology::new(square_ring(cells, 10.0, 10.0)).unwrap());
    let mut coordinator =
        MovementCoordinator::new(TokenId::new(0), board, EffectCycle::canonical(), HOP);
    if start > 0 {
        coordinator
            .request_move(i32::try_from(start).unwrap())
            .unwrap();
        while coordinator.is_busy() {
            coordinator.tick(HOP);
        }
        coordinator.clear_uncommitted_events();
    }
    coordinator
}

fn completions(coordinator: &MovementCoordinator) -> usize {
    coordinator
        .uncommitted_events()
        .iter()
        .filter(|kind| matches!(kind, BoardEventKind::MoveCompleted(_)))
        .count()
}

proptest! {
    #[test]
    fn test_move_visits_each_cell_in_order(
        (cells, start) in (1usize..40).prop_flat_map(|n| (Just(n), 0..n)),
        steps in 1u32..60,
    ) {
        let mut coordinator = coordinator_at(cells, start);

        let dispatch = coordinator.request_move(i32::try_from(steps).unwrap()).unwrap();
        prop_assert_eq!(dispatch, Dispatch::Started);

        let mut visited = Vec::new();
        while coordinator.is_busy() {
            visited.extend(coordinator.hop_target());
            coordinator.tick(HOP);
        }

        let expected: Vec<usize> = (1..=steps as usize).map(|k| (start + k) % cells).collect();
        prop_assert_eq!(visited, expected);
        prop_assert_eq!(coordinator.current_position(), (start + steps as usize) % cells);
        prop_assert_eq!(completions(&coordinator), 1);
    }

    #[test]
    fn test_second_request_changes_nothing(
        cells in 1usize..30,
        first in 1i32..20,
        second in 1i32..20,
        delay_ticks in 0usize..5,
    ) {
        let mut coordinator = coordinator_at(cells, 0);
        coordinator.request_move(first).unwrap();
        for _ in 0..delay_ticks {
            coordinator.tick(HOP / 2);
        }

        if coordinator.is_busy() {
            prop_assert_eq!(coordinator.request_move(second).unwrap(), Dispatch::Ignored);
        }
        while coordinator.is_busy() {
            coordinator.tick(HOP);
        }

        prop_assert_eq!(coordinator.current_position(), first as usize % cells);
        prop_assert_eq!(completions(&coordinator), 1);
    }

    #[test]
    fn test_resolve_is_pure(position in 0usize..10_000) {
        let cycle = EffectCycle::canonical();

        prop_assert_eq!(cycle.resolve(position), cycle.resolve(position));
        prop_assert_eq!(cycle.resolve(position), cycle.resolve(position + cycle.len()));
    }
}
