//! Merge sort versus heap selection on player-sized inputs

use std::cmp::Reverse;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use league_core::ranking::{largest_n, merge_sort_by_key, merge_sort_by_key_desc};
use league_core::Player;

fn players(count: u32) -> Vec<Player> {
    // Deterministic spread of ages and scores
    (0..count)
        .map(|id| {
            let performance = i64::from((id * 7919) % 101);
            let age = 16 + (id * 31) % 25;
            Player::new(id, format!("P{}", id), age, performance)
        })
        .collect()
}

fn bench_full_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_sort");
    for size in [100u32, 1_000, 10_000] {
        let roster = players(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &roster, |b, roster| {
            b.iter(|| merge_sort_by_key(black_box(roster), |p| (p.performance, Reverse(p.age))))
        });
    }
    group.finish();
}

fn bench_top_ten(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_10");
    for size in [100u32, 1_000, 10_000] {
        let roster = players(size);
        group.bench_with_input(BenchmarkId::new("sort_then_take", size), &roster, |b, roster| {
            b.iter(|| {
                let mut sorted = merge_sort_by_key_desc(black_box(roster), |p| p.performance);
                sorted.truncate(10);
                sorted
            })
        });
        group.bench_with_input(BenchmarkId::new("heap_select", size), &roster, |b, roster| {
            b.iter(|| largest_n(black_box(roster), 10, |p| p.performance))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_sort, bench_top_ten);
criterion_main!(benches);
