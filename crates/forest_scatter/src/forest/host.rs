//! Host integration: instantiating assets and writing back their materials.
//!
//! The runner talks to the host engine only through [`SceneHost`]. [`PrefabLibrary`] is
//! an in-memory host used by tests, benches and the example binaries.
use std::collections::HashMap;

use crate::forest::AssetId;
use crate::material::{PropertyMaterial, SurfaceMaterial};
use crate::transform::InstanceTransform;

/// Host engine operations the runner needs.
pub trait SceneHost {
    type Material: SurfaceMaterial;
    /// Opaque handle to a spawned instance.
    type Instance;

    /// Spawns an instance of `asset`. `None` means the asset could not be instantiated;
    /// the candidate then does not count as placed.
    fn instantiate(&mut self, asset: &str) -> Option<Self::Instance>;

    /// Positions a freshly spawned instance.
    fn apply_transform(&mut self, _instance: &Self::Instance, _transform: &InstanceTransform) {}

    /// Current material slots of an instance, as independent copies.
    fn material_slots(&self, instance: &Self::Instance) -> Vec<Self::Material>;

    /// Replaces the material slots of an instance.
    fn apply_materials(&mut self, instance: &Self::Instance, materials: &[Self::Material]);
}

/// Handle into a [`PrefabLibrary`]'s spawned list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnedId(pub usize);

/// An instance spawned by a [`PrefabLibrary`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedInstance<M> {
    pub asset: AssetId,
    pub transform: Option<InstanceTransform>,
    pub materials: Vec<M>,
}

/// In-memory host: prefabs are named lists of material slots.
#[derive(Debug, Clone)]
pub struct PrefabLibrary<M = PropertyMaterial> {
    prefabs: HashMap<AssetId, Vec<M>>,
    spawned: Vec<SpawnedInstance<M>>,
}

impl<M> Default for PrefabLibrary<M> {
    fn default() -> Self {
        Self {
            prefabs: HashMap::new(),
            spawned: Vec::new(),
        }
    }
}

impl<M: SurfaceMaterial> PrefabLibrary<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a prefab.
    pub fn register(&mut self, asset: impl Into<AssetId>, materials: Vec<M>) {
        self.prefabs.insert(asset.into(), materials);
    }

    pub fn with_prefab(mut self, asset: impl Into<AssetId>, materials: Vec<M>) -> Self {
        self.register(asset, materials);
        self
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.prefabs.contains_key(asset)
    }

    /// Shared prefab materials; never modified by spawning.
    pub fn prefab_materials(&self, asset: &str) -> Option<&[M]> {
        self.prefabs.get(asset).map(Vec::as_slice)
    }

    pub fn spawned(&self) -> &[SpawnedInstance<M>] {
        &self.spawned
    }

    pub fn get(&self, id: SpawnedId) -> Option<&SpawnedInstance<M>> {
        self.spawned.get(id.0)
    }

    /// Removes and returns every spawned instance.
    pub fn take_spawned(&mut self) -> Vec<SpawnedInstance<M>> {
        std::mem::take(&mut self.spawned)
    }
}

impl<M: SurfaceMaterial> SceneHost for PrefabLibrary<M> {
    type Material = M;
    type Instance = SpawnedId;

    fn instantiate(&mut self, asset: &str) -> Option<SpawnedId> {
        let materials = self.prefabs.get(asset)?.clone();
        self.spawned.push(SpawnedInstance {
            asset: asset.to_owned(),
            transform: None,
            materials,
        });
        Some(SpawnedId(self.spawned.len() - 1))
    }

    fn apply_transform(&mut self, instance: &SpawnedId, transform: &InstanceTransform) {
        if let Some(spawned) = self.spawned.get_mut(instance.0) {
            spawned.transform = Some(*transform);
        }
    }

    fn material_slots(&self, instance: &SpawnedId) -> Vec<M> {
        self.spawned
            .get(instance.0)
            .map(|s| s.materials.clone())
            .unwrap_or_default()
    }

    fn apply_materials(&mut self, instance: &SpawnedId, materials: &[M]) {
        if let Some(spawned) = self.spawned.get_mut(instance.0) {
            spawned.materials = materials.to_vec();
        }
    }
}
