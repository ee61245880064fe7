//! Criterion benchmarks for the pure pipeline stages.
//! Focus: streamwise resolutions {256, 1024, 4096} on the block layout, and
//! both free-meshing presets.
//! Results: by default under target/criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use inlet_mesh::backend::render_geo;
use inlet_mesh::params::{MeshMode, StructuredParams};
use inlet_mesh::{plan, presets};

fn bench_structured(c: &mut Criterion) {
    let mut group = c.benchmark_group("structured");
    for &cells in &[256usize, 1024, 4096] {
        let mut cfg = presets::mach5_structured();
        cfg.mesh = MeshMode::Structured(StructuredParams {
            target_streamwise_cells: cells,
            ..StructuredParams::default()
        });
        group.bench_with_input(BenchmarkId::new("plan", cells), &cfg, |b, cfg| {
            b.iter(|| plan(black_box(cfg)))
        });
    }
    let ready = plan(&presets::mach5_structured()).ok();
    if let Some(ready) = ready {
        group.bench_function("render_geo", |b| b.iter(|| render_geo(&ready.job())));
    }
    group.finish();
}

fn bench_unstructured(c: &mut Criterion) {
    let mut group = c.benchmark_group("unstructured");
    for cfg in [presets::mach5_unstructured(), presets::mach1_5_threshold()] {
        group.bench_with_input(BenchmarkId::new("plan", &cfg.name), &cfg, |b, cfg| {
            b.iter(|| plan(black_box(cfg)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_structured, bench_unstructured);
criterion_main!(benches);
