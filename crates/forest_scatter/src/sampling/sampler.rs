//! Bounded rejection sampling of candidate points for one item type.
use glam::{Vec2, Vec3};
use rand::RngCore;

use crate::field::{sample_surface, HeightNormalField};
use crate::sampling::clustering::ClusteringNoise;
use crate::sampling::density::{accepts, DensityEvaluator};
use crate::sampling::{rand01, rand_range};

/// Attempts allowed per requested instance before the sampler gives up.
pub const ATTEMPTS_PER_INSTANCE: usize = 10;

/// Upper bound on the up-front allocation in [`PlacementSampler::place`].
const PLACE_CAPACITY_HINT: usize = 4096;

/// An accepted candidate point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// World position with `y` at the surface height.
    pub position: Vec3,
    /// Unit surface normal at `position`.
    pub normal: Vec3,
    /// Slope at `position`, in degrees.
    pub slope: f32,
}

/// Outcome of a single candidate draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attempt {
    /// The sampled surface point.
    pub candidate: Candidate,
    /// Acceptance probability in `[0, 1]`; `None` when the slope cutoff rejected it.
    pub probability: Option<f32>,
    /// Whether the candidate was accepted.
    pub accepted: bool,
}

/// Counters for one item type's sampling loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerStats {
    /// Candidates drawn.
    pub attempts: usize,
    /// Candidates confirmed as placed.
    pub placed: usize,
    /// Candidates rejected by the slope cutoff.
    pub rejected_slope: usize,
    /// Candidates rejected by the acceptance draw.
    pub rejected_density: usize,
}

/// Clustering inputs shared by every candidate of one item type.
#[derive(Debug, Clone, Copy)]
pub struct ClusterSampling<'a> {
    pub noise: &'a ClusteringNoise,
    /// Run-level offset shared by all item types.
    pub offset: Vec2,
    /// Spatial scale of the clusters in world units.
    pub scale: f32,
    /// Index of the item type, used as the noise phase.
    pub item_type_index: usize,
}

/// Rejection sampler over an axis-aligned rectangle centered at `center`.
///
/// Draws candidates until `target` are placed or `target * 10` attempts were spent.
/// Under-placement is not an error; [`SamplerStats`] reports it.
pub struct PlacementSampler<'a, F: HeightNormalField + ?Sized> {
    field: &'a F,
    center: Vec3,
    extent: Vec2,
    target: usize,
    density: DensityEvaluator,
    clustering: Option<ClusterSampling<'a>>,
    stats: SamplerStats,
}

impl<'a, F: HeightNormalField + ?Sized> PlacementSampler<'a, F> {
    pub fn new(
        field: &'a F,
        center: Vec3,
        extent: Vec2,
        target: usize,
        density: DensityEvaluator,
    ) -> Self {
        Self {
            field,
            center,
            extent,
            target,
            density,
            clustering: None,
            stats: SamplerStats::default(),
        }
    }

    /// Consults clustering noise for every candidate that passes the slope cutoff.
    pub fn with_clustering(mut self, clustering: ClusterSampling<'a>) -> Self {
        self.clustering = Some(clustering);
        self
    }

    /// Maximum number of attempts for this sampler.
    pub fn budget(&self) -> usize {
        self.target.saturating_mul(ATTEMPTS_PER_INSTANCE)
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    /// True once the target is reached or the attempt budget is spent.
    pub fn is_done(&self) -> bool {
        self.stats.placed >= self.target || self.stats.attempts >= self.budget()
    }

    /// Draws and evaluates one candidate.
    ///
    /// Consumes two draws for the position and, when the slope passes, one for the
    /// acceptance test. Call [`Self::confirm_placed`] once an accepted candidate
    /// actually became an instance.
    pub fn attempt(&mut self, rng: &mut dyn RngCore) -> Attempt {
        self.stats.attempts += 1;

        let half = self.extent * 0.5;
        let x = rand_range(rng, -half.x, half.x);
        let z = rand_range(rng, -half.y, half.y);
        let surface = sample_surface(self.field, self.center.x + x, self.center.z + z);
        let candidate = Candidate {
            position: surface.position,
            normal: surface.normal,
            slope: surface.slope,
        };

        let cluster_sample = match &self.clustering {
            Some(c)
                if self.density.clustering_enabled()
                    && surface.slope <= self.density.max_slope =>
            {
                c.noise.sample(
                    surface.position.x,
                    surface.position.z,
                    c.item_type_index,
                    c.offset,
                    c.scale,
                )
            }
            _ => 0.0,
        };

        let Some(probability) = self
            .density
            .acceptance_probability(surface.slope, cluster_sample)
        else {
            self.stats.rejected_slope += 1;
            return Attempt {
                candidate,
                probability: None,
                accepted: false,
            };
        };

        let accepted = accepts(probability, rand01(rng));
        if !accepted {
            self.stats.rejected_density += 1;
        }

        Attempt {
            candidate,
            probability: Some(probability),
            accepted,
        }
    }

    /// Records that an accepted candidate was placed.
    pub fn confirm_placed(&mut self) {
        self.stats.placed += 1;
    }

    /// Draws until a candidate is accepted, or returns `None` when done.
    pub fn next_accepted(&mut self, rng: &mut dyn RngCore) -> Option<Candidate> {
        while !self.is_done() {
            let attempt = self.attempt(rng);
            if attempt.accepted {
                return Some(attempt.candidate);
            }
        }
        None
    }

    /// Runs the whole loop, treating every accepted candidate as placed.
    pub fn place(mut self, rng: &mut dyn RngCore) -> (Vec<Candidate>, SamplerStats) {
        let mut out = Vec::with_capacity(place_capacity(self.target));
        while let Some(candidate) = self.next_accepted(rng) {
            self.confirm_placed();
            out.push(candidate);
        }
        (out, self.stats)
    }
}

fn place_capacity(target: usize) -> usize {
    target.min(PLACE_CAPACITY_HINT)
}
