//! Multi-octave clustering noise that biases acceptance toward coherent patches.
use glam::Vec2;
use noise::{NoiseFn, Perlin};

/// Phase shift applied per item type index, in world units.
pub const ITEM_TYPE_PHASE_SHIFT: f64 = 7777.0;

/// Upper bound (exclusive) of each component of the per-run offset.
pub const CLUSTER_OFFSET_RANGE: f32 = 10_000.0;

/// `(phase multiplier, scale multiplier, weight)` per octave. Weights sum to 1.
const OCTAVES: [(f64, f64, f32); 3] = [(1.0, 1.0, 0.5), (1.7, 0.5, 0.3), (2.3, 0.25, 0.2)];

/// Deterministic 2D clustering field in `[0, 1]`.
///
/// Three octaves of smooth noise at the base, half and quarter cluster scale. Each item
/// type sees the same run-level offset but its own phase, so patterns are spatially
/// coherent yet decorrelated between types.
#[derive(Debug, Clone)]
pub struct ClusteringNoise {
    primitive: Perlin,
}

impl Default for ClusteringNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ClusteringNoise {
    /// Creates the field over a Perlin primitive with the given permutation seed.
    pub fn new(seed: u32) -> Self {
        Self {
            primitive: Perlin::new(seed),
        }
    }

    /// Smooth noise remapped from `[-1, 1]` into `[0, 1]`.
    fn smooth01(&self, x: f64, z: f64) -> f32 {
        let v = self.primitive.get([x, z]) * 0.5 + 0.5;
        (v as f32).clamp(0.0, 1.0)
    }

    /// Samples the clustering value at world `(world_x, world_z)`.
    pub fn sample(
        &self,
        world_x: f32,
        world_z: f32,
        item_type_index: usize,
        offset: Vec2,
        cluster_scale: f32,
    ) -> f32 {
        let phase = item_type_index as f64 * ITEM_TYPE_PHASE_SHIFT;
        let x = world_x as f64 + offset.x as f64;
        let z = world_z as f64 + offset.y as f64;
        let scale = cluster_scale as f64;

        OCTAVES
            .iter()
            .map(|&(phase_mul, scale_mul, weight)| {
                let shift = phase * phase_mul;
                let s = scale * scale_mul;
                self.smooth01((x + shift) / s, (z + shift) / s) * weight
            })
            .sum()
    }
}
