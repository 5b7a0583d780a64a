use forest_scatter::prelude::*;
use forest_scatter_examples::{init_tracing, render_forest_to_png, RenderConfig, TerrainDef};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tree(prefix: &str) -> Vec<PropertyMaterial> {
    vec![
        PropertyMaterial::new(format!("{prefix}_Leaves"))
            .with_color("_BaseColor", Color::WHITE)
            .with_cutoff(0.5),
        PropertyMaterial::new(format!("{prefix}_Bark")).with_color("_BaseColor", Color::WHITE),
    ]
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let terrain = TerrainDef::Hills {
        size: (1000.0, 1000.0),
        resolution: 257,
        amplitude: 220.0,
        frequency: 0.003,
        octaves: 4,
        seed: 3,
    };
    let field = terrain.build()?;
    let region = ForestRegion::new(Vec2::new(1000.0, 1000.0));
    let mut host = PrefabLibrary::new()
        .with_prefab("beech", tree("Beech"))
        .with_prefab("pine", tree("Pine"));

    let specs = vec![
        ItemTypeSpec::new("beech", 600)
            .with_max_slope(20.0)
            .with_leaf_gradient(ColorGradient::new(
                Color::rgb(0.2, 0.55, 0.15),
                Color::rgb(0.45, 0.75, 0.25),
            )),
        ItemTypeSpec::new("pine", 600)
            .with_max_slope(40.0)
            .with_tilt_z(-6.0, 6.0)
            .with_scale_range(3.0, 4.5)
            .with_leaf_gradient(ColorGradient::new(
                Color::rgb(0.05, 0.25, 0.12),
                Color::rgb(0.12, 0.38, 0.2),
            )),
    ];

    let mut rng = StdRng::seed_from_u64(7);
    let mut events = VecSink::only(&[ForestEventKind::ItemTypeFinished]);
    let runner = ForestRunner::try_new(region, ClusteringConfig::enabled(120.0, 0.85), &field)?;
    let result = runner.generate_with_events(&specs, &mut host, &mut rng, &mut events)?;

    for event in events.into_inner() {
        if let ForestEvent::ItemTypeFinished { stats } = event {
            println!(
                "{}: placed {}/{} in {} attempts ({} too steep, {} thinned)",
                stats.asset,
                stats.placed,
                stats.expected,
                stats.attempts,
                stats.rejected_slope,
                stats.rejected_density
            );
        }
    }
    println!(
        "{} ({} attempts)",
        result.summary(),
        result.total_attempts()
    );

    let rc =
        RenderConfig::for_region((1000, 1000), &region, &field).with_background([228, 222, 200]);
    render_forest_to_png(&result, &field, &rc, "clustered-hills.png")?;

    Ok(())
}
