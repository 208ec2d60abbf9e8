use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_sokoban::core::{resolve_move, Board, Engine, GameSnapshot, PlayerState, LEVEL_ONE};
use tui_sokoban::term::{FrameBuffer, GameView, Viewport};
use tui_sokoban::types::{Direction, LevelId};

fn bench_resolve_move(c: &mut Criterion) {
    let board = Board::load_level(&LEVEL_ONE).unwrap();
    let player = PlayerState::new(LEVEL_ONE.start);

    c.bench_function("resolve_move_cycle", |b| {
        b.iter(|| {
            let mut board = board.clone();
            let mut player = player;
            for dir in Direction::ALL {
                black_box(resolve_move(&mut board, &mut player, black_box(dir)));
            }
        })
    });
}

fn bench_engine_tick(c: &mut Criterion) {
    let t0 = Instant::now();
    let mut engine = Engine::new_level(LevelId::One, t0).unwrap();
    let mut ms = 0u64;

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            ms += 16;
            black_box(engine.tick(t0 + Duration::from_millis(ms)));
        })
    });
}

fn bench_move_and_undo(c: &mut Criterion) {
    let mut engine = Engine::new_level(LevelId::One, Instant::now()).unwrap();

    c.bench_function("move_then_undo", |b| {
        b.iter(|| {
            engine.apply_move(black_box(Direction::Right));
            let _ = engine.undo();
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let engine = Engine::new_level(LevelId::One, Instant::now()).unwrap();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_move,
    bench_engine_tick,
    bench_move_and_undo,
    bench_render
);
criterion_main!(benches);
