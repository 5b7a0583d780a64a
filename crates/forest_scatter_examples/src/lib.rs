#![forbid(unsafe_code)]

mod config;
mod rendering;

pub use config::{ForestFile, PrefabDef, TerrainDef};
pub use rendering::{init_tracing, render_forest_to_png, RenderConfig};
