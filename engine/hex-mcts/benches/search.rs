//! Search benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p hex-mcts`
//!
//! Playout throughput bounds how many iterations fit into a decision
//! budget; the tree operations are the per-iteration bookkeeping around it.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hex_core::{Board, CellState};
use hex_mcts::{simulate_random_playout, SearchTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_playouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_playout");

    for size in [5, 7, 11] {
        group.bench_with_input(BenchmarkId::new("empty_board", size), &size, |b, &size| {
            let board = Board::new(size).unwrap();
            let mut rng = ChaCha20Rng::seed_from_u64(42);

            b.iter(|| {
                let winner = simulate_random_playout(
                    (size / 2, size / 2),
                    CellState::Blue,
                    board.clone(),
                    &mut rng,
                )
                .unwrap();
                black_box(winner)
            });
        });
    }

    group.finish();
}

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_ops");

    group.bench_function("expand_root_11x11", |b| {
        let board = Board::new(11).unwrap();
        b.iter(|| {
            let mut tree = SearchTree::new(CellState::Blue);
            tree.expand_root(&board);
            black_box(tree.len())
        });
    });

    group.bench_function("select_child_121_children", |b| {
        let board = Board::new(11).unwrap();
        let mut tree = SearchTree::new(CellState::Blue);
        tree.expand_root(&board);

        // Give every child statistics so selection exercises the full
        // UCT formula rather than the unvisited fast path.
        for (i, &id) in tree.children().to_vec().iter().enumerate() {
            let winner = if i % 3 == 0 {
                CellState::Blue
            } else {
                CellState::Red
            };
            tree.backpropagate(id, winner);
        }

        b.iter(|| black_box(tree.select_child(1.41)));
    });

    group.bench_function("backpropagate", |b| {
        let board = Board::new(11).unwrap();
        let mut tree = SearchTree::new(CellState::Blue);
        tree.expand_root(&board);
        let child = tree.children()[60];

        b.iter(|| black_box(tree.backpropagate(child, CellState::Blue)));
    });

    group.bench_function("best_child_121_children", |b| {
        let board = Board::new(11).unwrap();
        let mut tree = SearchTree::new(CellState::Blue);
        tree.expand_root(&board);
        for (i, &id) in tree.children().to_vec().iter().enumerate() {
            let winner = if i % 2 == 0 {
                CellState::Blue
            } else {
                CellState::Red
            };
            tree.backpropagate(id, winner);
        }

        b.iter(|| black_box(tree.best_child()));
    });

    group.finish();
}

criterion_group!(benches, bench_playouts, bench_tree_operations);
criterion_main!(benches);
