//! Random play never leaves the engine in an illegal placement.

use proptest::prelude::*;

use blockfall::core::{GameState, ScoringRules};
use blockfall::engine::GameDriver;
use blockfall::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy)]
enum Step {
    Act(GameAction),
    Frame(u32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => prop_oneof![
            Just(GameAction::MoveLeft),
            Just(GameAction::MoveRight),
            Just(GameAction::SoftDrop),
            Just(GameAction::RotateCw),
            Just(GameAction::RotateCcw),
        ]
        .prop_map(Step::Act),
        1 => prop_oneof![
            Just(GameAction::HardDrop),
            Just(GameAction::Pause),
            Just(GameAction::Restart),
        ]
        .prop_map(Step::Act),
        2 => (1u32..1500).prop_map(Step::Frame),
    ]
}

fn assert_legal(state: &GameState) {
    let board = state.board();
    assert_eq!(board.cells().len(), BOARD_WIDTH as usize * BOARD_HEIGHT as usize);
    if state.game_over() {
        return;
    }
    let active = state.active().expect("running sessions have a piece");
    assert!(
        !state.collides(0, 0, &active.shape),
        "illegal placement {active:?}"
    );
    for (x, _) in active.cells() {
        assert!((0..BOARD_WIDTH as i8).contains(&x));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn active_piece_never_collides(
        seed in any::<u32>(),
        flat in any::<bool>(),
        steps in prop::collection::vec(step(), 1..400),
    ) {
        let rules = if flat { ScoringRules::flat() } else { ScoringRules::classic() };
        let mut driver = GameDriver::new(seed, rules);
        assert_legal(driver.state());

        for step in steps {
            match step {
                Step::Act(action) => {
                    driver.dispatch(action);
                }
                Step::Frame(ms) => {
                    driver.frame(ms);
                }
            }
            assert_legal(driver.state());
        }
    }

    #[test]
    fn score_and_lines_never_decrease_within_a_session(
        seed in any::<u32>(),
        steps in prop::collection::vec(step(), 1..300),
    ) {
        let mut driver = GameDriver::new(seed, ScoringRules::classic());
        let mut last = (driver.state().session_id(), 0u32, 0u32);

        for step in steps {
            match step {
                Step::Act(action) => {
                    driver.dispatch(action);
                }
                Step::Frame(ms) => {
                    driver.frame(ms);
                }
            }
            let state = driver.state();
            let now = (state.session_id(), state.score(), state.lines());
            if now.0 == last.0 {
                prop_assert!(now.1 >= last.1);
                prop_assert!(now.2 >= last.2);
                prop_assert_eq!(state.level(), 1 + state.lines() / 10);
            }
            last = now;
        }
    }
}
