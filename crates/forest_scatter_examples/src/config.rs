//! RON forest descriptions: terrain, prefabs, region, clustering and item types.
use std::path::Path;

use forest_scatter::prelude::*;
use glam::Vec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// A complete forest description loaded from a `.ron` file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForestFile {
    pub seed: u64,
    pub terrain: TerrainDef,
    #[serde(default)]
    pub region: ForestRegion,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub prefabs: Vec<PrefabDef>,
    pub item_types: Vec<ItemTypeSpec>,
}

/// A named prefab and its material slots.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrefabDef {
    pub asset: String,
    pub materials: Vec<PropertyMaterial>,
}

/// Procedural terrain, centered on the world origin.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TerrainDef {
    Flat {
        size: (f32, f32),
        height: f32,
    },
    Hills {
        size: (f32, f32),
        resolution: usize,
        /// Peak height above the terrain origin.
        amplitude: f32,
        /// Base frequency in cycles per world unit.
        frequency: f64,
        octaves: usize,
        seed: u32,
    },
}

impl TerrainDef {
    pub fn build(&self) -> forest_scatter::error::Result<HeightmapField> {
        match *self {
            TerrainDef::Flat { size, height } => HeightmapField::from_fn(
                Vec3::new(-size.0 * 0.5, 0.0, -size.1 * 0.5),
                Vec3::new(size.0, height.max(1.0), size.1),
                (2, 2),
                |_, _| height,
            ),
            TerrainDef::Hills {
                size,
                resolution,
                amplitude,
                frequency,
                octaves,
                seed,
            } => {
                let fbm = Fbm::<Perlin>::new(seed)
                    .set_octaves(octaves)
                    .set_frequency(frequency);
                HeightmapField::from_fn(
                    Vec3::new(-size.0 * 0.5, 0.0, -size.1 * 0.5),
                    Vec3::new(size.0, amplitude.max(1.0), size.1),
                    (resolution, resolution),
                    |x, z| {
                        let v = fbm.get([x as f64, z as f64]) * 0.5 + 0.5;
                        v.clamp(0.0, 1.0) as f32 * amplitude
                    },
                )
            }
        }
    }
}

impl ForestFile {
    pub fn from_ron_str(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&text)
    }

    /// In-memory host holding every declared prefab.
    pub fn library(&self) -> PrefabLibrary {
        self.prefabs
            .iter()
            .fold(PrefabLibrary::new(), |lib, p| {
                lib.with_prefab(p.asset.clone(), p.materials.clone())
            })
    }
}
