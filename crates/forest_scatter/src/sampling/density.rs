//! Acceptance probability from slope fade and clustering.
//!
//! The slope limit is a hard cutoff: a candidate steeper than `max_slope` is rejected
//! before any probability is computed. Below the limit the density starts at `1.0`,
//! optionally fades linearly to `0.0` at the limit, and is scaled by the clustering
//! multiplier when clustering is enabled.
use glam::FloatExt;

/// Exponent compressing clustering noise toward `1.0`.
pub const CLUSTER_BOOST_EXPONENT: f32 = 0.7;

/// Gain applied to the boosted noise at full clustering strength.
pub const CLUSTER_PEAK_GAIN: f32 = 1.5;

/// Slope-derived density, or `None` when the slope exceeds the limit.
pub fn slope_density(slope: f32, max_slope: f32, fade: bool) -> Option<f32> {
    if slope > max_slope {
        return None;
    }
    if fade && slope > 0.0 {
        Some(1.0 - slope / max_slope)
    } else {
        Some(1.0)
    }
}

/// Density multiplier for a clustering sample at the given strength.
///
/// `lerp(1, sample^0.7 * 1.5, strength)`. Not clamped: values above `1.0` occur in
/// cluster cores at high strength.
pub fn cluster_multiplier(sample: f32, strength: f32) -> f32 {
    let boosted = sample.max(0.0).powf(CLUSTER_BOOST_EXPONENT);
    1.0_f32.lerp(boosted * CLUSTER_PEAK_GAIN, strength)
}

/// Per-item-type density rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityEvaluator {
    /// Slope limit in degrees.
    pub max_slope: f32,
    /// Fade density linearly toward the slope limit.
    pub slope_density_fade: bool,
    /// Clustering strength, when clustering is enabled.
    pub cluster_strength: Option<f32>,
}

impl DensityEvaluator {
    pub fn new(max_slope: f32, slope_density_fade: bool) -> Self {
        Self {
            max_slope,
            slope_density_fade,
            cluster_strength: None,
        }
    }

    /// Enables the clustering multiplier with the given strength.
    pub fn with_clustering(mut self, strength: f32) -> Self {
        self.cluster_strength = Some(strength);
        self
    }

    pub fn clustering_enabled(&self) -> bool {
        self.cluster_strength.is_some()
    }

    /// Raw density for a candidate, unclamped. `None` means the slope cutoff rejected it.
    ///
    /// `cluster_sample` is ignored when clustering is disabled.
    pub fn density(&self, slope: f32, cluster_sample: f32) -> Option<f32> {
        let base = slope_density(slope, self.max_slope, self.slope_density_fade)?;
        Some(match self.cluster_strength {
            Some(strength) => base * cluster_multiplier(cluster_sample, strength),
            None => base,
        })
    }

    /// Acceptance probability in `[0, 1]`. `None` means the slope cutoff rejected it.
    pub fn acceptance_probability(&self, slope: f32, cluster_sample: f32) -> Option<f32> {
        self.density(slope, cluster_sample)
            .map(|d| d.clamp(0.0, 1.0))
    }
}

/// Acceptance test for a uniform draw in `[0, 1)`.
#[inline]
pub fn accepts(probability: f32, draw: f32) -> bool {
    draw <= probability
}
