//! Forest generation: item type configuration, region, host integration, events and runner.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::material::{ColorGradient, MaterialRole, PropertyMaterial};
use crate::sampling::rand_range;

pub mod events;
pub mod host;
pub mod region;
pub mod runner;

pub type AssetId = String;

/// Inclusive degree range for a random tilt.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltRange {
    pub min_degrees: f32,
    pub max_degrees: f32,
}

impl TiltRange {
    pub fn new(min_degrees: f32, max_degrees: f32) -> Self {
        Self {
            min_degrees,
            max_degrees,
        }
    }

    /// Random angle in degrees. Consumes one draw.
    pub fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        rand_range(rng, self.min_degrees, self.max_degrees)
    }
}

/// Optional whole-material replacements, keyed by role.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialOverrides<M> {
    pub leaf: Option<M>,
    pub branch: Option<M>,
    pub trunk: Option<M>,
}

impl<M> Default for MaterialOverrides<M> {
    fn default() -> Self {
        Self {
            leaf: None,
            branch: None,
            trunk: None,
        }
    }
}

impl<M> MaterialOverrides<M> {
    pub fn is_empty(&self) -> bool {
        self.leaf.is_none() && self.branch.is_none() && self.trunk.is_none()
    }

    pub fn for_role(&self, role: MaterialRole) -> Option<&M> {
        match role {
            MaterialRole::Leaf => self.leaf.as_ref(),
            MaterialRole::Branch => self.branch.as_ref(),
            MaterialRole::Trunk => self.trunk.as_ref(),
            MaterialRole::Other => None,
        }
    }
}

/// One placeable asset and its placement, transform and color policy.
///
/// Item types without an asset or with `count == 0` are skipped by the runner and do
/// not count toward the expected total.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTypeSpec<M = PropertyMaterial> {
    /// Asset to instantiate.
    pub asset: Option<AssetId>,
    /// Target number of instances.
    pub count: usize,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Slope limit in degrees. Steeper candidates are always rejected.
    pub max_slope: f32,
    /// Fade density linearly from flat ground to the slope limit.
    pub slope_density_fade: bool,
    /// Random local X tilt, if enabled.
    pub tilt_x: Option<TiltRange>,
    /// Random local Z tilt, if enabled.
    pub tilt_z: Option<TiltRange>,
    pub leaf_gradient: ColorGradient,
    /// Alpha cutoff written to recolored materials, in `[0, 1]`.
    pub alpha_cutoff: f32,
    /// Recolor every material slot instead of leaf slots only.
    pub ignore_classification: bool,
    pub overrides: MaterialOverrides<M>,
}

impl<M> Default for ItemTypeSpec<M> {
    fn default() -> Self {
        Self {
            asset: None,
            count: 20,
            min_scale: 2.0,
            max_scale: 3.5,
            max_slope: 40.0,
            slope_density_fade: true,
            tilt_x: None,
            tilt_z: None,
            leaf_gradient: ColorGradient::default(),
            alpha_cutoff: 0.0,
            ignore_classification: false,
            overrides: MaterialOverrides::default(),
        }
    }
}

impl<M> ItemTypeSpec<M> {
    /// Item type for `asset` with `count` instances and default policy.
    pub fn new(asset: impl Into<AssetId>, count: usize) -> Self {
        Self {
            asset: Some(asset.into()),
            count,
            ..Default::default()
        }
    }

    pub fn with_scale_range(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn with_max_slope(mut self, degrees: f32) -> Self {
        self.max_slope = degrees;
        self
    }

    pub fn with_slope_density_fade(mut self, fade: bool) -> Self {
        self.slope_density_fade = fade;
        self
    }

    pub fn with_tilt_x(mut self, min_degrees: f32, max_degrees: f32) -> Self {
        self.tilt_x = Some(TiltRange::new(min_degrees, max_degrees));
        self
    }

    pub fn with_tilt_z(mut self, min_degrees: f32, max_degrees: f32) -> Self {
        self.tilt_z = Some(TiltRange::new(min_degrees, max_degrees));
        self
    }

    pub fn with_leaf_gradient(mut self, gradient: ColorGradient) -> Self {
        self.leaf_gradient = gradient;
        self
    }

    pub fn with_alpha_cutoff(mut self, cutoff: f32) -> Self {
        self.alpha_cutoff = cutoff;
        self
    }

    pub fn with_ignore_classification(mut self, ignore: bool) -> Self {
        self.ignore_classification = ignore;
        self
    }

    pub fn with_leaf_override(mut self, material: M) -> Self {
        self.overrides.leaf = Some(material);
        self
    }

    pub fn with_branch_override(mut self, material: M) -> Self {
        self.overrides.branch = Some(material);
        self
    }

    pub fn with_trunk_override(mut self, material: M) -> Self {
        self.overrides.trunk = Some(material);
        self
    }

    /// Whether the runner places this item type at all.
    pub fn is_retained(&self) -> bool {
        self.asset.is_some() && self.count > 0
    }

    /// Checks the parameters of a retained item type. `index` is used in the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidItemType {
            index,
            reason: reason.into(),
        };

        if !(self.min_scale.is_finite() && self.max_scale.is_finite()) {
            return Err(invalid("scale range must be finite"));
        }
        if self.min_scale <= 0.0 || self.max_scale <= 0.0 {
            return Err(invalid("scale range must be > 0"));
        }
        if self.min_scale > self.max_scale {
            return Err(invalid("min_scale must be <= max_scale"));
        }
        if !self.max_slope.is_finite() || self.max_slope < 0.0 {
            return Err(invalid("max_slope must be finite and >= 0"));
        }
        if !(0.0..=1.0).contains(&self.alpha_cutoff) {
            return Err(invalid("alpha_cutoff must be in [0, 1]"));
        }
        let tilts = [self.tilt_x, self.tilt_z];
        if tilts
            .iter()
            .flatten()
            .any(|t| !t.min_degrees.is_finite() || !t.max_degrees.is_finite())
        {
            return Err(invalid("tilt ranges must be finite"));
        }
        Ok(())
    }
}

/// Cluster strength upper bound.
pub const MAX_CLUSTER_STRENGTH: f32 = 0.95;

/// Optional spatial clustering shared by all item types of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringConfig {
    pub enabled: bool,
    /// Spatial scale of the clusters in world units (typically 30 to 300).
    pub scale: f32,
    /// Strength in `[0, 0.95]`; `0` disables the effect.
    pub strength: f32,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scale: 100.0,
            strength: 0.7,
        }
    }
}

impl ClusteringConfig {
    /// Enabled clustering with the given scale and strength.
    pub fn enabled(scale: f32, strength: f32) -> Self {
        Self {
            enabled: true,
            scale,
            strength,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Validates scale and strength when clustering is enabled.
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidConfig("cluster scale must be > 0".into()));
        }
        if !(0.0..=MAX_CLUSTER_STRENGTH).contains(&self.strength) {
            return Err(Error::InvalidConfig(format!(
                "cluster strength must be in [0, {MAX_CLUSTER_STRENGTH}]"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ItemTypeSpec {
        ItemTypeSpec::new("oak", 10)
    }

    #[test]
    fn defaults_match_documented_values() {
        let s: ItemTypeSpec = ItemTypeSpec::default();
        assert_eq!(s.count, 20);
        assert_eq!((s.min_scale, s.max_scale), (2.0, 3.5));
        assert_eq!(s.max_slope, 40.0);
        assert!(s.slope_density_fade);
        assert!(!s.is_retained());
    }

    #[test]
    fn retained_requires_asset_and_count() {
        assert!(spec().is_retained());
        assert!(!ItemTypeSpec::<PropertyMaterial>::new("oak", 0).is_retained());
    }

    #[test]
    fn validate_rejects_bad_scale_and_cutoff() {
        assert!(spec().validate(0).is_ok());
        assert!(spec().with_scale_range(3.0, 2.0).validate(0).is_err());
        assert!(spec().with_scale_range(0.0, 2.0).validate(0).is_err());
        assert!(spec().with_alpha_cutoff(1.5).validate(0).is_err());
        assert!(spec().with_max_slope(-1.0).validate(0).is_err());
        assert!(spec().with_tilt_x(f32::NAN, 4.0).validate(0).is_err());
        let err = spec().with_scale_range(3.0, 2.0).validate(4).unwrap_err();
        assert!(matches!(err, Error::InvalidItemType { index: 4, .. }));
    }

    #[test]
    fn reversed_tilt_range_is_allowed() {
        assert!(spec().with_tilt_z(10.0, -10.0).validate(0).is_ok());
    }

    #[test]
    fn clustering_validation_only_applies_when_enabled() {
        assert!(ClusteringConfig::disabled().validate().is_ok());
        assert!(ClusteringConfig {
            enabled: false,
            scale: -1.0,
            strength: 5.0,
        }
        .validate()
        .is_ok());
        assert!(ClusteringConfig::enabled(100.0, 0.95).validate().is_ok());
        assert!(ClusteringConfig::enabled(0.0, 0.5).validate().is_err());
        assert!(ClusteringConfig::enabled(100.0, 0.96).validate().is_err());
    }

    #[test]
    fn overrides_lookup_by_role() {
        let o = MaterialOverrides {
            leaf: Some(1),
            branch: None,
            trunk: Some(3),
        };
        assert_eq!(o.for_role(MaterialRole::Leaf), Some(&1));
        assert_eq!(o.for_role(MaterialRole::Branch), None);
        assert_eq!(o.for_role(MaterialRole::Other), None);
        assert!(!o.is_empty());
        assert!(MaterialOverrides::<u8>::default().is_empty());
    }
}
