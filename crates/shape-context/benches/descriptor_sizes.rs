//! Descriptor cost as the point count grows.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shape_context::{NeighborhoodMode, PointSet, ShapeContextBuilder, ShapeContextParams};
use std::hint::black_box;

/// Points on a wobbly ellipse, deterministic for a given count.
fn contour(n: usize) -> PointSet {
    let rows: Vec<[f64; 2]> = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            let r = 1.0 + 0.15 * (5.0 * t).sin();
            [40.0 * r * t.cos(), 25.0 * r * t.sin()]
        })
        .collect();
    PointSet::from_rows(&rows).expect("finite contour")
}

fn bench_all_pairs(c: &mut Criterion) {
    let builder = ShapeContextBuilder::new(ShapeContextParams::default()).expect("valid params");
    let mut group = c.benchmark_group("all_pairs");
    for n in [50usize, 100, 200] {
        let points = contour(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| builder.build(black_box(points)).expect("descriptors"))
        });
    }
    group.finish();
}

fn bench_windowed(c: &mut Criterion) {
    let params = ShapeContextParams::default()
        .with_window(10.0)
        .with_neighborhood(NeighborhoodMode::SymmetricBox);
    let builder = ShapeContextBuilder::new(params).expect("valid params");
    let mut group = c.benchmark_group("symmetric_window");
    for n in [50usize, 100, 200] {
        let points = contour(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| builder.build(black_box(points)).expect("descriptors"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_all_pairs, bench_windowed);
criterion_main!(benches);
