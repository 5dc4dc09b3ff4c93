//! Rule-level properties of the engine, exercised through the facade crate.

use std::collections::HashSet;

use blockfall::core::{Bag, Board, GameState, ScoringRules};
use blockfall::types::{
    drop_interval_ms, level_for_lines, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH,
};

fn seed_starting_with(kind: PieceKind) -> u32 {
    (1..10_000)
        .find(|&seed| Bag::new(seed).draw() == kind)
        .expect("some seed starts with every kind")
}

fn board_with_rows(rows: &[usize]) -> Board {
    let mut board = Board::new();
    for &y in rows {
        board.fill_row(y, PieceKind::Z);
    }
    board
}

#[test]
fn seven_spawns_from_an_empty_bag_cover_every_kind() {
    for seed in [1, 7, 42, 2024, 99_999] {
        let mut state = GameState::new(seed, ScoringRules::classic());
        let mut kinds = vec![state.active().unwrap().kind];
        for _ in 0..6 {
            assert!(state.spawn_piece());
            kinds.push(state.active().unwrap().kind);
        }
        let distinct: HashSet<_> = kinds.iter().copied().collect();
        assert_eq!(distinct.len(), 7, "seed {seed}: {kinds:?}");

        // The next seven come from a fresh shuffle.
        let next: HashSet<_> = (0..7)
            .map(|_| {
                state.spawn_piece();
                state.active().unwrap().kind
            })
            .collect();
        assert_eq!(next.len(), 7);
    }
}

#[test]
fn lock_writes_visible_cells_and_discards_hidden_ones() {
    for kind in PieceKind::ALL {
        let mut state = GameState::new(seed_starting_with(kind), ScoringRules::classic());
        let active = state.active().unwrap();
        let cells: Vec<_> = active.cells().collect();

        state.lock_piece();

        for (x, y) in cells {
            if y >= 0 {
                assert_eq!(state.board().get(x, y), Some(Some(kind)), "{kind:?} at ({x},{y})");
            }
        }
        let occupied = state.board().cells().iter().filter(|c| c.is_some()).count();
        let visible = active.cells().filter(|&(_, y)| y >= 0).count();
        assert_eq!(occupied, visible);
    }
}

#[test]
fn clearing_rows_five_and_seven() {
    let mut board = board_with_rows(&[5, 7]);
    // Every other row keeps at least one gap.
    for y in 0..BOARD_HEIGHT as i8 {
        if y != 5 && y != 7 {
            board.set(y % BOARD_WIDTH as i8, y, Some(PieceKind::L));
        }
    }
    let mut state = GameState::with_board(1, ScoringRules::classic(), board);

    let clear = state.clear_lines();
    assert_eq!(clear.lines, 2);
    assert_eq!(state.lines(), 2);
    assert_eq!(state.board().rows().count(), BOARD_HEIGHT as usize);

    let board = state.board();
    assert!(board.is_row_empty(0));
    assert!(board.is_row_empty(1));
    // Row 6 slid down to 7; rows 0..=4 slid down to 2..=6.
    assert_eq!(board.get(6, 7), Some(Some(PieceKind::L)));
    for old_y in 0..=4i8 {
        assert_eq!(
            board.get(old_y % BOARD_WIDTH as i8, old_y + 2),
            Some(Some(PieceKind::L))
        );
    }
    // Rows below the cleared band are untouched.
    for y in 8..BOARD_HEIGHT as i8 {
        assert_eq!(board.get(y % BOARD_WIDTH as i8, y), Some(Some(PieceKind::L)));
    }
}

#[test]
fn scoring_law_classic() {
    let rules = ScoringRules::classic();

    let mut single = GameState::with_board(1, rules, board_with_rows(&[19]));
    single.clear_lines();
    assert_eq!(single.score(), 40);

    let mut tetris = GameState::with_board(1, rules, board_with_rows(&[16, 17, 18, 19]));
    let clear = tetris.clear_lines();
    assert_eq!(clear.points, 1200);
    assert_eq!(tetris.score(), 1200);

    assert_eq!(rules.line_clear_points(4, 3), 3600);
}

#[test]
fn scoring_law_flat() {
    let mut state =
        GameState::with_board(1, ScoringRules::flat(), board_with_rows(&[16, 17, 18, 19]));
    assert_eq!(state.clear_lines().points, 800);
}

#[test]
fn level_and_interval_law() {
    for lines in 0..200 {
        let level = level_for_lines(lines);
        assert_eq!(level, 1 + lines / 10);
        let expected = 1000i64 - (level as i64 - 1) * 75;
        assert_eq!(drop_interval_ms(level) as i64, expected.max(100));
    }

    let rows: Vec<usize> = (10..20).collect();
    let mut state = GameState::with_board(1, ScoringRules::classic(), board_with_rows(&rows));
    let clear = state.clear_lines();
    assert!(clear.leveled_up);
    assert_eq!(state.level(), 2);
    assert_eq!(state.drop_interval_ms(), 925);
}

#[test]
fn rotation_prefers_left_kick_over_right() {
    let seed = seed_starting_with(PieceKind::I);
    // Vertical I lands in frame column 2, i.e. board column 5.
    let mut board = Board::new();
    board.set(5, 1, Some(PieceKind::O));
    let mut state = GameState::with_board(seed, ScoringRules::classic(), board.clone());
    assert!(state.apply_action(GameAction::RotateCw));
    assert_eq!(state.active().unwrap().x, 2);

    // With the left column blocked too, the right kick wins.
    board.set(4, 1, Some(PieceKind::O));
    let mut state = GameState::with_board(seed, ScoringRules::classic(), board);
    assert!(state.apply_action(GameAction::RotateCw));
    assert_eq!(state.active().unwrap().x, 4);
}

#[test]
fn game_over_ignores_everything_but_reset() {
    let mut board = Board::new();
    for x in 3..=6 {
        board.set(x, 0, Some(PieceKind::T));
    }
    let mut state = GameState::with_board(5, ScoringRules::classic(), board);
    assert!(state.game_over());
    let before = state.snapshot();

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Pause,
    ] {
        assert!(!state.apply_action(action), "{action:?}");
    }
    state.lock_piece();
    assert_eq!(state.snapshot(), before);

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
}

#[test]
fn reset_restores_a_fresh_session() {
    let mut state = GameState::new(11, ScoringRules::classic());
    while !state.game_over() {
        state.apply_action(GameAction::HardDrop);
    }
    assert!(state.score() > 0);

    assert!(state.reset());
    assert_eq!(state.score(), 0);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.drop_interval_ms(), 1000);
    assert!(!state.paused());
    assert!(!state.game_over());
    assert!(state.board().is_empty());
    assert!(state.active().is_some());
    assert!(state.last_event().is_none());
    assert_eq!(state.snapshot().last_lock, None);
}

#[test]
fn pause_freezes_piece_mutation() {
    let mut state = GameState::new(3, ScoringRules::classic());
    assert!(state.apply_action(GameAction::Pause));
    let before = state.snapshot();
    for action in [
        GameAction::MoveLeft,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::Restart,
    ] {
        assert!(!state.apply_action(action));
    }
    assert_eq!(state.snapshot(), before);
    assert!(state.apply_action(GameAction::Pause));
    assert!(!state.paused());
}

#[test]
fn ghost_matches_hard_drop_without_mutating() {
    let mut state = GameState::new(8, ScoringRules::classic());
    let ghost = state.ghost_y().unwrap();
    let before = state.snapshot();
    assert_eq!(state.ghost_y(), Some(ghost));
    assert_eq!(state.snapshot(), before);

    let start_y = state.active().unwrap().y;
    let rows = state.hard_drop();
    assert_eq!(start_y + rows as i8, ghost);
}
