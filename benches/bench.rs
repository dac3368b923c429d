use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use sudoku_solver::sudoku::grid::Grid;
use sudoku_solver::sudoku::propagation::{FifoWorklist, LifoWorklist, propagate};
use sudoku_solver::sudoku::selection::{CellSelection, FirstUnknown, MinimumRemaining};
use sudoku_solver::sudoku::solver::{Engine, solve};
use sudoku_solver::sudoku::topology::PeerTable;

const EASY: &str = "\
    53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n\
    7...2...6\n.6....28.\n...419..5\n....8..79";

const HARD: &str = "\
    8........\n..36.....\n.7..9.2..\n.5...7...\n....457..\n\
    ...1...3.\n..1....68\n..85...1.\n.9....4..";

fn bench_solve(c: &mut Criterion) {
    let easy: Grid = EASY.parse().unwrap();
    let hard: Grid = HARD.parse().unwrap();

    let mut group = c.benchmark_group("solve");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("easy", |b| b.iter(|| solve(black_box(easy))));
    group.bench_function("hard", |b| b.iter(|| solve(black_box(hard))));

    group.finish();
}

fn bench_selection<S: CellSelection>(c: &mut Criterion, name: &str) {
    // The easy puzzle: first-unknown selection would blow up on the hard one.
    let easy: Grid = EASY.parse().unwrap();
    let peers = PeerTable::new();

    c.bench_function(name, |b| {
        b.iter(|| {
            let mut engine: Engine<S> = Engine::new(&peers);
            engine.solve(black_box(easy))
        });
    });
}

fn bench_selections(c: &mut Criterion) {
    bench_selection::<MinimumRemaining>(c, "selection/mrv");
    bench_selection::<FirstUnknown>(c, "selection/first");
}

fn bench_propagation(c: &mut Criterion) {
    let easy: Grid = EASY.parse().unwrap();
    let peers = PeerTable::new();

    let mut group = c.benchmark_group("propagation");

    group.bench_function("fifo", |b| {
        b.iter(|| {
            let mut board = sudoku_solver::sudoku::board::Board::new(black_box(easy), &peers);
            propagate::<FifoWorklist>(&mut board)
        });
    });

    group.bench_function("lifo", |b| {
        b.iter(|| {
            let mut board = sudoku_solver::sudoku::board::Board::new(black_box(easy), &peers);
            propagate::<LifoWorklist>(&mut board)
        });
    });

    group.finish();
}

fn bench_peer_table(c: &mut Criterion) {
    c.bench_function("peer_table/build", |b| b.iter(PeerTable::new));
}

criterion_group!(
    benches,
    bench_solve,
    bench_selections,
    bench_propagation,
    bench_peer_table
);
criterion_main!(benches);
