use forest_scatter::prelude::*;
use forest_scatter_examples::{init_tracing, render_forest_to_png, ForestFile, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        format!("{}/assets/mixed-forest.ron", env!("CARGO_MANIFEST_DIR"))
    });
    let file = ForestFile::load(&path)?;
    let field = file.terrain.build()?;
    let mut host = file.library();

    let mut rng = StdRng::seed_from_u64(file.seed);
    let result = generate_forest(
        &field,
        file.region,
        file.clustering,
        &file.item_types,
        &mut host,
        &mut rng,
    )?;

    for stats in &result.item_stats {
        let failed = if stats.failed_instantiations > 0 {
            format!(", {} failed to spawn", stats.failed_instantiations)
        } else {
            String::new()
        };
        println!(
            "#{} {}: {}/{}{}",
            stats.index, stats.asset, stats.placed, stats.expected, failed
        );
    }
    println!("{}", result.summary());

    let rc = RenderConfig::for_region((1000, 1000), &file.region, &field);
    render_forest_to_png(&result, &field, &rc, "forest-from-ron.png")?;

    Ok(())
}
