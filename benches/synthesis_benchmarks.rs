//! Benchmarks for wave-field synthesis and load integration.
//!
//! Covers the two per-realization costs that dominate Monte Carlo batches:
//! - elevation-only synthesis (one inverse FFT per record)
//! - full kinematics synthesis plus the Morison depth integration

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wavesim_core::{
    morison_load, synthesize_elevation, synthesize_realization, Conditioning, DepthGrid,
    FrequencyGrid, MorisonCoeffs, SeaState, SpectrumModel, TimeGrid,
};

fn storm(duration_secs: f64) -> (SeaState, TimeGrid) {
    let time = TimeGrid::new(duration_secs, 4.0).unwrap();
    let grid = FrequencyGrid::for_record(&time);
    let sea_state = SeaState::new(SpectrumModel::jonswap(25.0, 12.0).unwrap(), grid).unwrap();
    (sea_state, time)
}

fn bench_elevation_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize_elevation");
    for &duration in &[120.0, 1200.0, 3600.0] {
        let (sea_state, time) = storm(duration);
        group.bench_with_input(
            BenchmarkId::from_parameter(duration as usize),
            &duration,
            |b, _| {
                b.iter(|| {
                    synthesize_elevation(
                        black_box(&sea_state),
                        black_box(&time),
                        Conditioning::Unconditional,
                        42,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_full_realization_and_load(c: &mut Criterion) {
    let (sea_state, time) = storm(120.0);
    let depths = DepthGrid::new(-100.0, 50.0, 150).unwrap();
    let coeffs = MorisonCoeffs::cylinder(1025.0, 1.0, 2.0, 5.0).unwrap();

    c.bench_function("synthesize_realization_150_levels", |b| {
        b.iter(|| {
            synthesize_realization(
                black_box(&sea_state),
                black_box(&time),
                black_box(&depths),
                Conditioning::Crest(30.0),
                42,
            )
            .unwrap()
        })
    });

    let realization =
        synthesize_realization(&sea_state, &time, &depths, Conditioning::Unconditional, 42)
            .unwrap();
    c.bench_function("morison_load_150_levels", |b| {
        b.iter(|| morison_load(black_box(&realization), black_box(&coeffs)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_elevation_synthesis,
    bench_full_realization_and_load
);
criterion_main!(benches);
