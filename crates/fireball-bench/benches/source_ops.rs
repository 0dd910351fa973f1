//! Criterion benchmarks for hadron deposition.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fireball_bench::reference_event;
use fireball_core::{HydroSource, REST_FLOW};
use fireball_source::{HadronSource, SmearingKernel};

fn bench_kernel_weight(c: &mut Criterion) {
    let kernel = SmearingKernel::new(0.5, 0.5, true, 4.0).unwrap();
    c.bench_function("kernel_weight_covariant", |b| {
        b.iter(|| {
            black_box(kernel.weight(
                black_box(0.3),
                black_box(-0.2),
                black_box(0.1),
                [0.2, 0.1, 0.4],
                1.0,
            ))
        });
    });
}

fn source_with(n: usize) -> HadronSource {
    let mut source = HadronSource::builder().delta_tau(0.05).build().unwrap();
    source.add_event(reference_event(n, 42));
    source
}

fn bench_energy_source_scan(c: &mut Criterion) {
    let mut source = source_with(2000);
    source.prepare_active_list(1.0);

    // One transverse plane of a 50×50 mesh at η = 0.
    c.bench_function("energy_source_2k_hadrons_plane", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for ix in 0..50 {
                for iy in 0..50 {
                    let (x, y) = (-5.0 + 0.2 * ix as f64, -5.0 + 0.2 * iy as f64);
                    total += source.energy_source(1.0, x, y, 0.0, &REST_FLOW)[0];
                }
            }
            black_box(total)
        });
    });
}

fn bench_prepare_active_list(c: &mut Criterion) {
    let mut source = source_with(20_000);
    c.bench_function("prepare_active_list_20k", |b| {
        b.iter(|| {
            source.prepare_active_list(black_box(1.0));
            black_box(source.active().len())
        });
    });
}

criterion_group!(
    benches,
    bench_kernel_weight,
    bench_energy_source_scan,
    bench_prepare_active_list
);
criterion_main!(benches);
