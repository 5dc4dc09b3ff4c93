use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameSnapshot, GameState, ScoringRules};
use blockfall::engine::GameDriver;
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind};

fn bench_frame(c: &mut Criterion) {
    let mut driver = GameDriver::new(12345, ScoringRules::classic());

    c.bench_function("driver_frame_16ms", |b| {
        b.iter(|| {
            driver.frame(black_box(16));
            if driver.state().game_over() {
                driver.dispatch(GameAction::Restart);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                board.fill_row(y, PieceKind::I);
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut state = GameState::new(12345, ScoringRules::classic());

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn_piece();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345, ScoringRules::classic());
    let mut dx = 1;

    c.bench_function("move_horizontal", |b| {
        b.iter(|| {
            if !state.move_horizontal(black_box(dx)) {
                dx = -dx;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345, ScoringRules::classic());

    c.bench_function("rotate_with_kicks", |b| {
        b.iter(|| {
            state.apply_action(black_box(GameAction::RotateCw));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345, ScoringRules::classic());

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
            }
            black_box(state.hard_drop());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = GameState::new(12345, ScoringRules::classic());
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), viewport, &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_frame,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_hard_drop,
    bench_render
);
criterion_main!(benches);
