use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gs_mcts::{Mcts, MctsConfig};
use gs_nogo::Board;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn bench_search(c: &mut Criterion) {
    c.bench_function("mcts_100_iterations_empty_board", |bench| {
        bench.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let mut tree = Mcts::new(
                black_box(Board::new()),
                MctsConfig {
                    simulations: 100,
                    ..MctsConfig::default()
                },
            );
            tree.run(&mut rng)
        })
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let board = Board::new();
    c.bench_function("nogo_legal_moves_empty_board", |bench| {
        bench.iter(|| black_box(&board).legal_moves())
    });
}

criterion_group!(benches, bench_search, bench_legal_moves);
criterion_main!(benches);
