mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use forest_scatter::prelude::{
    ClusteringConfig, Color, ForestRegion, ForestRunner, ItemTypeSpec, PrefabLibrary,
    PropertyMaterial,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_library() -> PrefabLibrary {
    let tree = vec![
        PropertyMaterial::new("Leaves")
            .with_color("_BaseColor", Color::WHITE)
            .with_cutoff(0.5),
        PropertyMaterial::new("Branches").with_color("_BaseColor", Color::WHITE),
        PropertyMaterial::new("Bark").with_color("_BaseColor", Color::WHITE),
    ];
    PrefabLibrary::new()
        .with_prefab("oak", tree.clone())
        .with_prefab("birch", tree.clone())
        .with_prefab("spruce", tree)
}

fn make_specs(per_type: usize) -> Vec<ItemTypeSpec> {
    vec![
        ItemTypeSpec::new("oak", per_type).with_max_slope(30.0),
        ItemTypeSpec::new("birch", per_type).with_tilt_x(-4.0, 4.0),
        ItemTypeSpec::new("spruce", per_type)
            .with_max_slope(45.0)
            .with_scale_range(3.0, 5.0),
    ]
}

fn bench_forest(c: &mut Criterion, bench_name: &str, clustering: ClusteringConfig) {
    let field = common::rolling_hills(257);
    let runner = ForestRunner::try_new(
        ForestRegion::new(Vec2::new(1000.0, 1000.0)),
        clustering,
        &field,
    )
    .expect("valid config");
    let specs = make_specs(1_000);

    let mut group = c.benchmark_group(bench_name);
    // Preview a run to set meaningful throughput in "placements per iteration".
    let mut rng_preview = StdRng::seed_from_u64(0xF0_4E57);
    let preview = runner
        .generate(&specs, &mut make_library(), &mut rng_preview)
        .expect("valid specs");
    group.throughput(common::elements_throughput(preview.total_placed()));

    let mut rng = StdRng::seed_from_u64(0x7BEE5);
    group.bench_function("three_item_types", |b| {
        b.iter_batched(
            make_library,
            |mut host| {
                let result = runner
                    .generate(&specs, &mut host, &mut rng)
                    .expect("valid specs");
                black_box(result.total_placed());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn forest_unclustered_benches(c: &mut Criterion) {
    bench_forest(c, "forest/unclustered", ClusteringConfig::disabled());
}

fn forest_clustered_benches(c: &mut Criterion) {
    bench_forest(c, "forest/clustered", ClusteringConfig::enabled(120.0, 0.8));
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = forest_unclustered_benches, forest_clustered_benches
}
criterion_main!(benches);
