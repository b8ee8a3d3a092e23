//! Benchmarks for the channel projector hot loop.
//!
//! Run:
//! - cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use plumbline::core::normalize::normalize;
use plumbline::core::projector::{ProbeMode, project};

const CLOUD_LENS: [usize; 3] = [1_000, 10_000, 100_000];

fn build_cloud(n: usize) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(0xBA1A);
    let raw: Vec<[f64; 3]> = (0..n)
        .map(|_| {
            [
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(0.0..50.0),
            ]
        })
        .collect();
    normalize(&raw).points
}

fn bench_project_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_modes");
    group.sample_size(50);

    for &n in &CLOUD_LENS {
        let cloud = build_cloud(n);
        for mode in [ProbeMode::Xw, ProbeMode::Fixed, ProbeMode::Corner] {
            let id = BenchmarkId::new("case", format!("{mode}_n{n}"));
            group.bench_with_input(id, &cloud, |b, cloud| {
                b.iter(|| {
                    let stats = project(black_box(cloud), mode, 0.65, 2.2, 0.7);
                    black_box(stats)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_project_modes);
criterion_main!(benches);
