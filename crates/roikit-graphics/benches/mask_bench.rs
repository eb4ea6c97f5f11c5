//! Mask rasterization benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roikit_graphics::Graphic;

fn bench_masks(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask");

    let ellipse = Graphic::from_kind("ellipse-graphic").unwrap();
    group.bench_function("ellipse_512", |b| {
        b.iter(|| black_box(ellipse.mask(512, 512, None)))
    });

    let ring = Graphic::from_kind("ring-graphic").unwrap();
    group.bench_function("ring_512", |b| {
        b.iter(|| black_box(ring.mask(512, 512, None)))
    });

    let lattice = Graphic::from_kind("lattice-graphic").unwrap();
    group.bench_function("lattice_512", |b| {
        b.iter(|| black_box(lattice.mask(512, 512, None)))
    });

    let spot = Graphic::from_kind("spot-graphic").unwrap();
    group.bench_function("spot_512", |b| {
        b.iter(|| black_box(spot.mask(512, 512, None)))
    });

    group.finish();
}

criterion_group!(benches, bench_masks);
criterion_main!(benches);
