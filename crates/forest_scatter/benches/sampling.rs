mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use forest_scatter::prelude::{ClusteringNoise, DensityEvaluator, PlacementSampler};
use forest_scatter::sampling::sampler::ClusterSampling;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

const TARGETS: [usize; 4] = [100, 1_000, 5_000, 20_000];
const STRENGTHS: [f32; 3] = [0.0, 0.5, 0.95];

fn clustering_noise_benches(c: &mut Criterion) {
    let noise = ClusteringNoise::default();
    let offset = Vec2::new(1234.5, 6789.0);

    let mut group = c.benchmark_group("sampling/clustering_noise");
    group.throughput(common::elements_throughput(64 * 64));
    group.bench_function("grid_64x64", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for iz in 0..64 {
                for ix in 0..64 {
                    acc += noise.sample(ix as f32 * 8.0, iz as f32 * 8.0, 1, offset, 100.0);
                }
            }
            black_box(acc);
        });
    });
    group.finish();
}

fn sampler_flat_benches(c: &mut Criterion) {
    let field = common::rolling_hills(129);
    let extent = Vec2::new(1000.0, 1000.0);

    let mut group = c.benchmark_group("sampling/sampler");
    for &target in &TARGETS {
        group.throughput(common::elements_throughput(target));
        let mut rng = StdRng::seed_from_u64(0x5EED ^ target as u64);
        group.bench_with_input(BenchmarkId::from_parameter(target), &target, |b, &target| {
            b.iter(|| {
                let sampler = PlacementSampler::new(
                    &field,
                    Vec3::ZERO,
                    extent,
                    target,
                    DensityEvaluator::new(30.0, true),
                );
                let (points, stats) = sampler.place(&mut rng);
                black_box((points.len(), stats.attempts));
            });
        });
    }
    group.finish();
}

fn sampler_clustered_benches(c: &mut Criterion) {
    let field = common::rolling_hills(129);
    let noise = ClusteringNoise::default();
    let extent = Vec2::new(1000.0, 1000.0);
    let target = 5_000;

    let mut group = c.benchmark_group("sampling/sampler_clustered");
    group.throughput(common::elements_throughput(target));
    for &strength in &STRENGTHS {
        let mut rng = StdRng::seed_from_u64(0xC1u64 ^ strength.to_bits() as u64);
        group.bench_with_input(
            BenchmarkId::from_parameter(strength),
            &strength,
            |b, &strength| {
                b.iter(|| {
                    let sampler = PlacementSampler::new(
                        &field,
                        Vec3::ZERO,
                        extent,
                        target,
                        DensityEvaluator::new(30.0, true).with_clustering(strength),
                    )
                    .with_clustering(ClusterSampling {
                        noise: &noise,
                        offset: Vec2::new(512.0, 256.0),
                        scale: 80.0,
                        item_type_index: 0,
                    });
                    let (points, _) = sampler.place(&mut rng);
                    black_box(points.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = clustering_noise_benches, sampler_flat_benches, sampler_clustered_benches
}
criterion_main!(benches);
