//! High-level runner that places every item type of a forest into a host scene.
use glam::{Vec2, Vec3};
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::field::HeightNormalField;
use crate::forest::events::{EventSink, ForestEvent, ForestEventKind};
use crate::forest::host::SceneHost;
use crate::forest::region::ForestRegion;
use crate::forest::{AssetId, ClusteringConfig, ItemTypeSpec, MAX_CLUSTER_STRENGTH};
use crate::material::assign::{MaterialColorAssigner, SlotEdit};
use crate::material::Color;
use crate::sampling::clustering::{ClusteringNoise, CLUSTER_OFFSET_RANGE};
use crate::sampling::density::DensityEvaluator;
use crate::sampling::rand_range;
use crate::sampling::sampler::{ClusterSampling, PlacementSampler};
use crate::transform::{InstanceTransform, TransformSynthesizer};

/// One placed instance of an item type.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementInstance<M> {
    /// Index of the item type in the configured list.
    pub item_index: usize,
    pub asset: AssetId,
    pub transform: InstanceTransform,
    /// Leaf color sampled from the item type's gradient.
    pub leaf_color: Color,
    /// Material slots as written back to the host.
    pub materials: Vec<M>,
    /// Slots that were substituted or recolored.
    pub edits: Vec<SlotEdit>,
}

impl<M> PlacementInstance<M> {
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }
}

/// Why an item type did not take part in a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingAsset,
    NoInstancesRequested,
}

/// Per item type diagnostics.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTypeStats {
    pub index: usize,
    pub asset: AssetId,
    /// Target instance count.
    pub expected: usize,
    pub attempts: usize,
    pub placed: usize,
    pub rejected_slope: usize,
    pub rejected_density: usize,
    /// Accepted candidates the host could not instantiate.
    pub failed_instantiations: usize,
}

impl ItemTypeStats {
    pub fn is_complete(&self) -> bool {
        self.placed >= self.expected
    }
}

/// Result of a forest generation run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult<M> {
    /// Instances in item type order, then acceptance order.
    pub instances: Vec<PlacementInstance<M>>,
    /// Stats of every retained item type, in configured order.
    pub item_stats: Vec<ItemTypeStats>,
    /// Clustering offset shared by all item types of the run.
    pub cluster_offset: Vec2,
}

impl<M> GenerationResult<M> {
    pub fn total_placed(&self) -> usize {
        self.instances.len()
    }

    /// Sum of the targets of retained item types.
    pub fn total_expected(&self) -> usize {
        self.item_stats.iter().map(|s| s.expected).sum()
    }

    pub fn total_attempts(&self) -> usize {
        self.item_stats.iter().map(|s| s.attempts).sum()
    }

    /// Whether every retained item type reached its target.
    pub fn is_complete(&self) -> bool {
        self.item_stats.iter().all(ItemTypeStats::is_complete)
    }

    /// Human-readable summary, e.g. `"Placed 48/50 instances."`.
    pub fn summary(&self) -> String {
        format!(
            "Placed {}/{} instances.",
            self.total_placed(),
            self.total_expected()
        )
    }
}

pub struct ForestRunner<'a, F: HeightNormalField + ?Sized> {
    /// Placement rectangle.
    pub region: ForestRegion,
    /// Clustering shared by all item types.
    pub clustering: ClusteringConfig,
    /// Terrain the instances are placed on.
    pub field: &'a F,
    noise: ClusteringNoise,
}

impl<'a, F: HeightNormalField + ?Sized> ForestRunner<'a, F> {
    pub fn try_new(
        region: ForestRegion,
        clustering: ClusteringConfig,
        field: &'a F,
    ) -> Result<Self> {
        region.validate()?;
        clustering.validate()?;
        Ok(Self {
            region,
            clustering,
            field,
            noise: ClusteringNoise::default(),
        })
    }

    pub fn new(region: ForestRegion, clustering: ClusteringConfig, field: &'a F) -> Self {
        debug_assert!(
            region.extent.x > 0.0 && region.extent.y > 0.0,
            "region extent must be > 0 in both components"
        );
        debug_assert!(
            !clustering.enabled || clustering.scale > 0.0,
            "cluster scale must be > 0"
        );
        debug_assert!(
            !clustering.enabled || (0.0..=MAX_CLUSTER_STRENGTH).contains(&clustering.strength),
            "cluster strength must be in [0, 0.95]"
        );

        Self {
            region,
            clustering,
            field,
            noise: ClusteringNoise::default(),
        }
    }

    /// Uses a differently seeded noise permutation for clustering.
    pub fn with_noise_seed(mut self, seed: u32) -> Self {
        self.noise = ClusteringNoise::new(seed);
        self
    }

    /// Places every item type, instantiating through `host`.
    pub fn generate<H: SceneHost>(
        &self,
        specs: &[ItemTypeSpec<H::Material>],
        host: &mut H,
        rng: &mut impl RngCore,
    ) -> Result<GenerationResult<H::Material>> {
        self.generate_with_events(specs, host, rng, &mut ())
    }

    pub fn generate_with_events<H: SceneHost>(
        &self,
        specs: &[ItemTypeSpec<H::Material>],
        host: &mut H,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult<H::Material>> {
        for (index, spec) in specs.iter().enumerate() {
            if spec.is_retained() {
                spec.validate(index)?;
            }
        }
        Ok(run_forest(self, specs, host, rng, sink))
    }
}

/// Validates the configuration and runs a single generation.
pub fn generate_forest<F, H>(
    field: &F,
    region: ForestRegion,
    clustering: ClusteringConfig,
    specs: &[ItemTypeSpec<H::Material>],
    host: &mut H,
    rng: &mut impl RngCore,
) -> Result<GenerationResult<H::Material>>
where
    F: HeightNormalField + ?Sized,
    H: SceneHost,
{
    ForestRunner::try_new(region, clustering, field)?.generate(specs, host, rng)
}

fn run_forest<F, H>(
    runner: &ForestRunner<'_, F>,
    specs: &[ItemTypeSpec<H::Material>],
    host: &mut H,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> GenerationResult<H::Material>
where
    F: HeightNormalField + ?Sized,
    H: SceneHost,
{
    let cluster_offset = Vec2::new(
        rand_range(rng, 0.0, CLUSTER_OFFSET_RANGE),
        rand_range(rng, 0.0, CLUSTER_OFFSET_RANGE),
    );
    if sink.wants(ForestEventKind::RunStarted) {
        sink.send(ForestEvent::RunStarted {
            item_type_count: specs.len(),
            cluster_offset,
        });
    }

    let center = runner.region.resolve_center(runner.field);
    let mut result = GenerationResult {
        instances: Vec::new(),
        item_stats: Vec::new(),
        cluster_offset,
    };

    for (index, spec) in specs.iter().enumerate() {
        let asset = match (&spec.asset, spec.count) {
            (None, _) => {
                skip_item_type(index, SkipReason::MissingAsset, sink);
                continue;
            }
            (Some(_), 0) => {
                skip_item_type(index, SkipReason::NoInstancesRequested, sink);
                continue;
            }
            (Some(asset), _) => asset,
        };

        info!(
            "Placing item type #{} ('{}'): {} instances.",
            index, asset, spec.count
        );
        if sink.wants(ForestEventKind::ItemTypeStarted) {
            sink.send(ForestEvent::ItemTypeStarted {
                index,
                asset: asset.clone(),
                target: spec.count,
            });
        }

        let mut density = DensityEvaluator::new(spec.max_slope, spec.slope_density_fade);
        let mut sampler = if runner.clustering.enabled {
            density = density.with_clustering(runner.clustering.strength);
            PlacementSampler::new(runner.field, center, runner.region.extent, spec.count, density)
                .with_clustering(ClusterSampling {
                    noise: &runner.noise,
                    offset: cluster_offset,
                    scale: runner.clustering.scale,
                    item_type_index: index,
                })
        } else {
            PlacementSampler::new(runner.field, center, runner.region.extent, spec.count, density)
        };

        let synthesizer = TransformSynthesizer::from_spec(spec);
        let assigner = MaterialColorAssigner::from_spec(spec);
        let mut failed_instantiations = 0;

        while !sampler.is_done() {
            let attempt = sampler.attempt(rng);
            if sink.wants(ForestEventKind::CandidateEvaluated) {
                sink.send(ForestEvent::CandidateEvaluated {
                    item_index: index,
                    position: attempt.candidate.position,
                    slope: attempt.candidate.slope,
                    probability: attempt.probability,
                    accepted: attempt.accepted,
                });
            }
            if !attempt.accepted {
                continue;
            }

            let Some(handle) = host.instantiate(asset) else {
                failed_instantiations += 1;
                warn!("Failed to instantiate asset '{}' for item type #{}.", asset, index);
                if sink.wants(ForestEventKind::Warning) {
                    sink.send(ForestEvent::Warning {
                        context: format!("item_type:{index} asset:{asset}"),
                        message: "Host could not instantiate asset".into(),
                    });
                }
                continue;
            };

            let candidate = attempt.candidate;
            let transform = synthesizer.synthesize(candidate.position, candidate.normal, rng);
            let leaf_color = spec.leaf_gradient.sample(rng);

            host.apply_transform(&handle, &transform);
            let assigned = assigner.assign(host.material_slots(&handle), leaf_color);
            host.apply_materials(&handle, &assigned.materials);
            sampler.confirm_placed();

            if sink.wants(ForestEventKind::PlacementMade) {
                sink.send(ForestEvent::PlacementMade {
                    item_index: index,
                    instance_index: result.instances.len(),
                    position: transform.translation,
                    scale: transform.scale,
                });
            }
            result.instances.push(PlacementInstance {
                item_index: index,
                asset: asset.clone(),
                transform,
                leaf_color,
                materials: assigned.materials,
                edits: assigned.edits,
            });
        }

        let sampled = sampler.stats();
        let stats = ItemTypeStats {
            index,
            asset: asset.clone(),
            expected: spec.count,
            attempts: sampled.attempts,
            placed: sampled.placed,
            rejected_slope: sampled.rejected_slope,
            rejected_density: sampled.rejected_density,
            failed_instantiations,
        };
        if !stats.is_complete() {
            warn!(
                "Item type #{} ('{}') placed {}/{} after {} attempts.",
                index, asset, stats.placed, stats.expected, stats.attempts
            );
            if sink.wants(ForestEventKind::Warning) {
                sink.send(ForestEvent::Warning {
                    context: format!("item_type:{index} asset:{asset}"),
                    message: format!(
                        "Attempt budget exhausted at {}/{} instances",
                        stats.placed, stats.expected
                    ),
                });
            }
        }
        if sink.wants(ForestEventKind::ItemTypeFinished) {
            sink.send(ForestEvent::ItemTypeFinished {
                stats: stats.clone(),
            });
        }
        result.item_stats.push(stats);
    }

    info!("{}", result.summary());
    if sink.wants(ForestEventKind::RunFinished) {
        sink.send(ForestEvent::RunFinished {
            placed: result.total_placed(),
            expected: result.total_expected(),
        });
    }
    result
}

fn skip_item_type(index: usize, reason: SkipReason, sink: &mut dyn EventSink) {
    debug!("Skipping item type #{}: {:?}.", index, reason);
    if sink.wants(ForestEventKind::ItemTypeSkipped) {
        sink.send(ForestEvent::ItemTypeSkipped { index, reason });
    }
}
