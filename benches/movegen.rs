use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rust_loa::core::{Board, Side};
use rust_loa::mcts::{Bitboard, MCTSConfig, MCTSSearch};
use rust_loa::rules::{check_win, enumerate_moves};

fn bench_enumerate(c: &mut Criterion) {
    let board = Board::initial();
    let bits = Bitboard::new(&board, Side::Black);

    c.bench_function("enumerate_moves/board", |b| {
        b.iter(|| enumerate_moves(black_box(&board), Side::Black))
    });
    c.bench_function("enumerate_moves/bitboard", |b| {
        b.iter(|| enumerate_moves(black_box(&bits), Side::Black))
    });
    c.bench_function("check_win/bitboard", |b| {
        b.iter(|| check_win(black_box(&bits), Side::White))
    });
}

fn bench_search(c: &mut Criterion) {
    let root = Bitboard::new(&Board::initial(), Side::Black);
    let config = MCTSConfig::default().with_iterations(500);

    c.bench_function("mcts/500", |b| {
        b.iter(|| {
            let mut search = MCTSSearch::new(config.clone());
            search.search(black_box(&root))
        })
    });
}

criterion_group!(benches, bench_enumerate, bench_search);
criterion_main!(benches);
