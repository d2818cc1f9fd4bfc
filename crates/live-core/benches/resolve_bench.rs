//! Benchmarks for cell evaluation.
//!
//! Run with: cargo bench -p live-core --bench resolve_bench

use criterion::{Criterion, criterion_group, criterion_main};
use live_core::{EvaluationMode, Live, pair_operands, select_if};
use std::hint::black_box;

// =============================================================================
// Leaf reads
// =============================================================================

fn bench_leaf(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve/leaf");

    let live = Live::constant(EvaluationMode::Live, 42i64);
    group.bench_function("live_constant", |b| b.iter(|| black_box(live.resolve())));

    let frozen = Live::constant(EvaluationMode::Frozen, 42i64);
    group.bench_function("frozen_constant", |b| b.iter(|| black_box(frozen.resolve())));

    let bounded = Live::new(42i64).with_bounds(0, 10);
    group.bench_function("bounded", |b| b.iter(|| black_box(bounded.resolve())));

    group.finish();
}

// =============================================================================
// Composite chains
// =============================================================================

fn bench_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve/chain");

    for depth in [1usize, 8, 64] {
        let one = Live::new(1i64);
        let mut acc = Live::new(0i64);
        for _ in 0..depth {
            acc = &acc + &one;
        }
        group.bench_function(format!("add_depth_{depth}"), |b| {
            b.iter(|| black_box(acc.resolve()))
        });
    }

    let condition = Live::new(0.3f64).lt(&Live::new(0.5f64));
    let picked = select_if(&condition, pair_operands(&Live::new(1.0f64), &Live::new(2.0f64)));
    group.bench_function("select", |b| b.iter(|| black_box(picked.resolve())));

    group.finish();
}

criterion_group!(benches, bench_leaf, bench_chains);
criterion_main!(benches);
