//! Benchmarks for wave-field integration.
//!
//! Run with: cargo bench -p dirac-medium

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dirac_medium::{MediumParams, MediumPreset, WaveField};

fn seeded_field(size: usize, params: MediumParams) -> WaveField {
    let mut field = WaveField::new(size, size, true, params, 42);
    field.add_impulse(size / 2, size / 2, 1.0);
    field.add_impulse(size / 4, size / 4, -0.5);
    field
}

fn bench_integrate_128(c: &mut Criterion) {
    c.bench_function("integrate_128x128_8_substeps", |b| {
        let mut field = seeded_field(128, MediumParams::default());
        let mut generation = 0u64;
        b.iter(|| {
            generation += 1;
            field.integrate(generation, 8, 0.2);
            black_box(field.energy());
        });
    });
}

fn bench_integrate_choppy(c: &mut Criterion) {
    c.bench_function("integrate_128x128_choppy", |b| {
        let mut field = seeded_field(128, MediumPreset::Choppy.parameters());
        let mut generation = 0u64;
        b.iter(|| {
            generation += 1;
            field.integrate(generation, 8, 0.2);
            black_box(field.energy());
        });
    });
}

criterion_group!(benches, bench_integrate_128, bench_integrate_choppy);
criterion_main!(benches);
