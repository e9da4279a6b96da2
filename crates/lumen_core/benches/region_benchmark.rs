//! # Region Heap Benchmark
//!
//! Measures allocate/free churn on the platform-backed regions against the
//! general-purpose region.
//!
//! Run with: cargo bench --package lumen_core --bench region_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lumen_core::{MemoryRegions, PoolLayout, Region};

/// Allocate a batch, then free it in reverse order.
fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("region_churn");

    for region in Region::ALL {
        let mut regions = MemoryRegions::new(PoolLayout::default());
        regions.initialize(region).expect("region init");

        group.bench_with_input(
            BenchmarkId::new("alloc_free_256", region.name()),
            &region,
            |b, &region| {
                let mut live = Vec::with_capacity(256);
                b.iter(|| {
                    for i in 0..256 {
                        live.push(regions.allocate(region, black_box(32 + i), 16));
                    }
                    while let Some(address) = live.pop() {
                        regions.free(region, address);
                    }
                });
            },
        );
    }

    group.finish();
}

/// Interleaved frees leave holes the first-fit search has to walk.
fn bench_fragmented(c: &mut Criterion) {
    let mut regions = MemoryRegions::new(PoolLayout::default());
    regions.initialize(Region::Mem1).expect("region init");

    let blocks: Vec<_> = (0..1024)
        .map(|_| regions.allocate(Region::Mem1, 64, 4))
        .collect();
    for address in blocks.iter().step_by(2) {
        regions.free(Region::Mem1, *address);
    }

    c.bench_function("mem1_fragmented_alloc", |b| {
        b.iter(|| {
            let address = regions.allocate(Region::Mem1, black_box(48), 4);
            regions.free(Region::Mem1, address);
        });
    });
}

criterion_group!(benches, bench_churn, bench_fragmented);
criterion_main!(benches);
