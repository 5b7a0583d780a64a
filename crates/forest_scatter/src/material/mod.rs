//! Colors, gradients and name-based material classification.
//!
//! Materials are only reached through the [`SurfaceMaterial`] capability trait: a name
//! plus optional mutable access to named color and float properties. The edit surface
//! is fixed to [`COLOR_PROPERTY_ALIASES`] and [`ALPHA_CUTOFF_PROPERTY`].
use rand::RngCore;

use crate::sampling::rand01;

pub mod assign;
pub mod property;

pub use assign::{AssignedMaterials, MaterialColorAssigner, SlotEdit};
pub use property::PropertyMaterial;

/// Color property names that receive the sampled leaf color.
pub const COLOR_PROPERTY_ALIASES: [&str; 3] = ["_Color", "_BaseColor", "_MainColor"];

/// Float property that receives the alpha cutoff.
pub const ALPHA_CUTOFF_PROPERTY: &str = "_Cutoff";

pub const LEAF_KEYWORDS: [&str; 4] = ["leaf", "leaves", "foliage", "canopy"];
pub const BRANCH_KEYWORDS: [&str; 2] = ["branch", "twig"];
pub const TRUNK_KEYWORDS: [&str; 4] = ["trunk", "bark", "stem", "wood"];

/// Linear RGBA color with components in `[0, 1]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise linear interpolation.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantizes to 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Two-stop gradient used to pick a random leaf color per instance.
///
/// Alpha is interpolated between the stops' alpha the same way as RGB.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGradient {
    pub start: Color,
    pub end: Color,
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self {
            start: Color::rgb(0.2, 0.6, 0.2),
            end: Color::rgb(0.4, 0.8, 0.3),
        }
    }
}

impl ColorGradient {
    pub fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }

    /// Color at position `t`, clamped to `[0, 1]`.
    pub fn evaluate(&self, t: f32) -> Color {
        self.start.lerp(self.end, t.clamp(0.0, 1.0))
    }

    /// Color at a random position. Consumes one draw.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Color {
        self.evaluate(rand01(rng))
    }
}

/// Semantic role of a material slot, derived from its name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    Leaf,
    Branch,
    Trunk,
    Other,
}

impl MaterialRole {
    /// Roles with keywords, in classification priority order.
    pub const PRIORITY: [MaterialRole; 3] =
        [MaterialRole::Leaf, MaterialRole::Branch, MaterialRole::Trunk];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            MaterialRole::Leaf => &LEAF_KEYWORDS,
            MaterialRole::Branch => &BRANCH_KEYWORDS,
            MaterialRole::Trunk => &TRUNK_KEYWORDS,
            MaterialRole::Other => &[],
        }
    }

    /// Whether a lower-cased material name contains one of this role's keywords.
    pub fn matches_lowercase(self, lowercase_name: &str) -> bool {
        self.keywords().iter().any(|k| lowercase_name.contains(k))
    }

    /// Classifies a material name: leaf first, then branch, then trunk.
    pub fn classify(name: &str) -> MaterialRole {
        let lower = name.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|role| role.matches_lowercase(&lower))
            .unwrap_or(MaterialRole::Other)
    }
}

/// Whether a material should receive the leaf color.
///
/// Conservative: only names with a leaf keyword qualify. Trunk and branch names and
/// unknown names never do.
pub fn is_leaf_material(name: &str) -> bool {
    MaterialRole::Leaf.matches_lowercase(&name.to_lowercase())
}

/// Capability view of a host material.
///
/// Cloning a material must produce an independent instance; edits are only ever made
/// on clones.
pub trait SurfaceMaterial: Clone {
    fn name(&self) -> &str;

    /// Mutable access to a color property, if the material has one with this name.
    fn color_property_mut(&mut self, name: &str) -> Option<&mut Color>;

    /// Mutable access to a float property, if the material has one with this name.
    fn float_property_mut(&mut self, name: &str) -> Option<&mut f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::test_rng::SequenceRng;

    #[test]
    fn classify_follows_priority() {
        assert_eq!(MaterialRole::classify("Leaf_Maple"), MaterialRole::Leaf);
        assert_eq!(MaterialRole::classify("Trunk_Bark"), MaterialRole::Trunk);
        assert_eq!(MaterialRole::classify("oak_TWIG"), MaterialRole::Branch);
        assert_eq!(MaterialRole::classify("LeafyBranch"), MaterialRole::Leaf);
        assert_eq!(MaterialRole::classify("BranchWood"), MaterialRole::Branch);
        assert_eq!(MaterialRole::classify("Rock_Moss"), MaterialRole::Other);
    }

    #[test]
    fn leaf_check_is_conservative() {
        assert!(is_leaf_material("Pine_Foliage"));
        assert!(is_leaf_material("CANOPY_01"));
        assert!(!is_leaf_material("Trunk_Bark"));
        assert!(!is_leaf_material("Birch_Twig"));
        assert!(!is_leaf_material("Default-Material"));
    }

    #[test]
    fn gradient_evaluates_endpoints_and_midpoint() {
        let g = ColorGradient::new(Color::rgb(0.0, 0.0, 0.0), Color::rgba(1.0, 0.5, 0.25, 0.5));
        assert_eq!(g.evaluate(0.0), Color::rgb(0.0, 0.0, 0.0));
        assert_eq!(g.evaluate(1.0), Color::rgba(1.0, 0.5, 0.25, 0.5));
        assert_eq!(g.evaluate(0.5), Color::rgba(0.5, 0.25, 0.125, 0.75));
        assert_eq!(g.evaluate(2.0), g.end);
    }

    #[test]
    fn gradient_sample_uses_one_draw() {
        let g = ColorGradient::default();
        let mut rng = SequenceRng::new(&[0.5]);
        let c = g.sample(&mut rng);
        assert_eq!(rng.draws, 1);
        assert!((c.r - 0.3).abs() < 1e-6);
        assert!((c.g - 0.7).abs() < 1e-6);
        assert!((c.b - 0.25).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn rgba8_quantization_clamps() {
        assert_eq!(Color::rgba(1.5, -0.2, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }
}
