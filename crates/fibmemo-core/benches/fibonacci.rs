//! Criterion benchmarks for the memoizing engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fibmemo_core::engine::FibEngine;
use fibmemo_core::strategy::Strategy;

fn bench_strategies(c: &mut Criterion) {
    let ns: Vec<u64> = vec![100, 1_000, 10_000];

    let mut group = c.benchmark_group("ColdCache");
    for &n in &ns {
        group.bench_with_input(BenchmarkId::new("iterative", n), &n, |b, &n| {
            b.iter(|| FibEngine::new().fib_owned(black_box(n)));
        });
        group.bench_with_input(BenchmarkId::new("recursive", n), &n, |b, &n| {
            b.iter(|| FibEngine::with_strategy(Strategy::recursive()).fib_owned(black_box(n)));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("WarmCache");
    for &n in &ns {
        let mut engine = FibEngine::new();
        engine.fib(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| engine.fib(black_box(n)).bits());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
