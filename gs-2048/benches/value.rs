use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gs_2048::{Board, ExpectimaxPlayer, NTupleNetwork};

fn bench_board() -> Board {
    Board::from_cells([3, 1, 0, 2, 5, 7, 0, 1, 2, 4, 0, 0, 1, 0, 11, 0])
}

fn bench_estimate(c: &mut Criterion) {
    let net = NTupleNetwork::zeroed();
    let b = bench_board();
    c.bench_function("ntuple_estimate_32_lookups", |bench| {
        bench.iter(|| net.estimate(black_box(&b)))
    });
}

fn bench_expectation(c: &mut Criterion) {
    let player = ExpectimaxPlayer::from_args("init").unwrap();
    let b = bench_board();
    c.bench_function("expectimax_chance_node", |bench| {
        bench.iter(|| player.expectation(black_box(&b)))
    });
}

criterion_group!(benches, bench_estimate, bench_expectation);
criterion_main!(benches);
