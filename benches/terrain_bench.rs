//! Criterion benchmarks for terrain generation.
//!
//! Benchmarks:
//!   - diamond-square at 256x256
//!   - mean and median filter (size 5) at 256x256
//!   - mesh build at 256x256
//!   - height query at an interior point
//!
//! Run with: cargo bench --bench terrain_bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use odyssey_engine::terrain::{
    FilterKind, MeshParams, generate_heightfield, height_at, mean_filter, median_filter,
};

const WIDTH: usize = 256;

fn bench_generate(c: &mut Criterion) {
    c.bench_function("diamond_square_256", |b| {
        b.iter(|| generate_heightfield(black_box(WIDTH), black_box(64), black_box(2000.0)))
    });
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_256");
    let base = generate_heightfield(WIDTH, 64, 2000.0).expect("valid width");

    for kind in [FilterKind::Mean, FilterKind::Median] {
        group.bench_function(format!("{kind:?}_5"), |b| {
            b.iter_batched(
                || base.clone(),
                |mut hf| match kind {
                    FilterKind::Mean => mean_filter(&mut hf, 5),
                    FilterKind::Median => median_filter(&mut hf, 5),
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_mesh(c: &mut Criterion) {
    let hf = generate_heightfield(WIDTH, 64, 2000.0).expect("valid width");
    let params = MeshParams::default();
    c.bench_function("mesh_build_256", |b| b.iter(|| hf.to_mesh(black_box(&params))));
}

fn bench_height_query(c: &mut Criterion) {
    let hf = generate_heightfield(WIDTH, 64, 2000.0).expect("valid width");
    let mesh = hf.to_mesh(&MeshParams::default()).expect("valid mesh");
    c.bench_function("height_at", |b| {
        b.iter(|| {
            height_at(
                black_box(1234.5),
                black_box(4321.25),
                black_box(&mesh.positions),
                black_box(32.0),
            )
        })
    });
}

criterion_group!(benches, bench_generate, bench_filters, bench_mesh, bench_height_query);
criterion_main!(benches);
