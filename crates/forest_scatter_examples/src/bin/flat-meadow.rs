use forest_scatter::prelude::*;
use forest_scatter_examples::{init_tracing, render_forest_to_png, RenderConfig};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let field = UniformField::centered(500.0, 500.0);
    let region = ForestRegion::new(Vec2::new(500.0, 500.0));
    let host_materials = vec![
        PropertyMaterial::new("Meadow_Leaves")
            .with_color("_BaseColor", Color::WHITE)
            .with_cutoff(0.5),
        PropertyMaterial::new("Meadow_Bark").with_color("_BaseColor", Color::rgb(0.3, 0.2, 0.1)),
    ];
    let mut host = PrefabLibrary::new().with_prefab("shrub", host_materials);

    let specs = vec![ItemTypeSpec::new("shrub", 50)
        .with_max_slope(40.0)
        .with_slope_density_fade(false)];

    let runner = ForestRunner::try_new(region, ClusteringConfig::disabled(), &field)?;
    let mut rng = StdRng::seed_from_u64(42);
    let result = runner.generate(&specs, &mut host, &mut rng)?;

    let stats = &result.item_stats[0];
    println!(
        "{} (attempts: {}, spawned in host: {})",
        result.summary(),
        stats.attempts,
        host.spawned().len()
    );

    let rc = RenderConfig::for_region((800, 800), &region, &field)
        .with_background([196, 214, 150])
        .with_slope_shading(false)
        .with_base_radius(2.5);
    render_forest_to_png(&result, &field, &rc, "flat-meadow.png")?;

    Ok(())
}
