#![forbid(unsafe_code)]
//! forest_scatter: Procedural forest placement over height/normal fields.
//!
//! Modules:
//! - field: height/normal field abstraction, uniform and heightmap fields
//! - sampling: clustering noise, slope/cluster density, bounded rejection sampling
//! - transform: normal-aligned rotation with random yaw, tilt and scale
//! - material: leaf classification, override substitution and gradient recoloring
//! - forest: item types, region, host integration, events and the runner
//!
//! For examples, see the README and the `forest_scatter_examples` crate.
pub mod error;
pub mod field;
pub mod forest;
pub mod material;
pub mod sampling;
pub mod transform;

/// Convenient re-exports for common types. Import with `use forest_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{
        sample_surface, slope_degrees, HeightNormalField, HeightmapField, SurfaceSample,
        UniformField,
    };
    pub use crate::forest::events::{
        AsEventSink, EventSink, FnSink, ForestEvent, ForestEventKind, MultiSink, VecSink,
    };
    pub use crate::forest::host::{PrefabLibrary, SceneHost, SpawnedId, SpawnedInstance};
    pub use crate::forest::region::{ForestRegion, RegionCenter};
    pub use crate::forest::runner::{
        generate_forest, ForestRunner, GenerationResult, ItemTypeStats, PlacementInstance,
        SkipReason,
    };
    pub use crate::forest::{AssetId, ClusteringConfig, ItemTypeSpec, MaterialOverrides, TiltRange};
    pub use crate::material::assign::{AssignedMaterials, MaterialColorAssigner, SlotEdit};
    pub use crate::material::{
        Color, ColorGradient, MaterialRole, PropertyMaterial, SurfaceMaterial,
    };
    pub use crate::sampling::{ClusteringNoise, DensityEvaluator, PlacementSampler};
    pub use crate::transform::{InstanceTransform, TransformSynthesizer};
}
