//! Physics engine benchmarks (criterion - wall-clock time).
//!
//! Run all:    cargo bench --manifest-path benchmarks/Cargo.toml --bench physics
//! Filter:     cargo bench --manifest-path benchmarks/Cargo.toml --bench physics -- broadphase

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use carom::{sat_test, BroadPhase, OctantSplit, UniformGrid};
use carom_bench::{box_pair, scattered_proxies, setup_pile};

// ---------------------------------------------------------------------------
// Broadphase
// ---------------------------------------------------------------------------

fn bench_broadphase(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("broadphase/uniform_grid");
        for &n in &[100, 500, 1000, 2000] {
            let proxies = scattered_proxies(n, 30.0);
            let grid = UniformGrid::new(4);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| grid.candidate_pairs(&proxies));
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("broadphase/octant_split");
        for &n in &[100, 500, 1000, 2000] {
            let proxies = scattered_proxies(n, 30.0);
            let octants = OctantSplit::new(3);
            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter(|| octants.candidate_pairs(&proxies));
            });
        }
        group.finish();
    }
}

// ---------------------------------------------------------------------------
// Narrowphase
// ---------------------------------------------------------------------------

fn bench_narrowphase(c: &mut Criterion) {
    let mut group = c.benchmark_group("narrowphase/sat");

    let (a, b) = box_pair(0.75, 0.0);
    group.bench_function("intersecting", |bench| {
        bench.iter(|| sat_test(&a, &b));
    });

    let (a, b) = box_pair(5.0, 0.0);
    group.bench_function("separated", |bench| {
        bench.iter(|| sat_test(&a, &b));
    });

    let (a, b) = box_pair(0.9, std::f32::consts::FRAC_PI_4);
    group.bench_function("rotated", |bench| {
        bench.iter(|| sat_test(&a, &b));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Full tick
// ---------------------------------------------------------------------------

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("world/tick");
    for &n in &[50, 200, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let (mut world, mut physics) = setup_pile(n);
            b.iter(|| physics.tick(&mut world, 1.0 / 60.0));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_broadphase, bench_narrowphase, bench_tick);
criterion_main!(benches);
