//! Benchmarks for slot pool accounting.
//!
//! Benchmarks cover:
//! - Acquire/release cycling across pool sizes
//! - Contended acquisition from multiple threads
//! - Free-count snapshots

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use slot_admission::SlotPool;

fn bench_acquire_release_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("acquire_release_cycle");

    for capacity in [1usize, 8, 64] {
        group.throughput(Throughput::Elements(capacity as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let pool = Arc::new(SlotPool::new(capacity));
                    let permits: Vec<_> = (0..capacity).map(|_| pool.acquire()).collect();
                    black_box(pool.free_count());
                    drop(permits);
                    black_box(pool.free_count());
                });
            },
        );
    }
    group.finish();
}

fn bench_contended_acquire(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_acquire");

    group.bench_function("four_threads_capacity_two", |b| {
        b.iter(|| {
            let pool = Arc::new(SlotPool::new(2));
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let pool = Arc::clone(&pool);
                    thread::spawn(move || {
                        for _ in 0..25 {
                            let permit = pool.acquire();
                            black_box(permit.slot_number());
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });
    group.finish();
}

fn bench_free_count_snapshot(c: &mut Criterion) {
    c.bench_function("free_count_snapshot", |b| {
        let pool = Arc::new(SlotPool::new(16));
        let held: Vec<_> = (0..8).map(|_| pool.acquire()).collect();
        b.iter(|| black_box(pool.free_count()));
        drop(held);
    });
}

criterion_group!(
    pool_benches,
    bench_acquire_release_cycle,
    bench_contended_acquire,
    bench_free_count_snapshot
);

criterion_main!(pool_benches);
