//! World transforms for accepted candidates.
//!
//! Rotation is built as `align(up -> normal) * yaw * tilt`, so the random yaw spins the
//! instance around the surface normal and the optional X/Z tilt is applied in the
//! instance's local frame afterwards. Scale is uniform.
use glam::{Affine3A, EulerRot, Quat, Vec3};
use rand::RngCore;

use crate::forest::{ItemTypeSpec, TiltRange};
use crate::sampling::rand_range;

/// Position, rotation and uniform scale of one placed instance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl InstanceTransform {
    /// Affine matrix applying scale, then rotation, then translation.
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }

    /// The instance's local up axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// Rotation taking the up axis onto `normal`.
pub fn align_to_normal(normal: Vec3) -> Quat {
    Quat::from_rotation_arc(Vec3::Y, normal.normalize_or(Vec3::Y))
}

/// Draws rotation and scale per an item type's policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSynthesizer {
    pub min_scale: f32,
    pub max_scale: f32,
    pub tilt_x: Option<TiltRange>,
    pub tilt_z: Option<TiltRange>,
}

impl TransformSynthesizer {
    pub fn from_spec<M>(spec: &ItemTypeSpec<M>) -> Self {
        Self {
            min_scale: spec.min_scale,
            max_scale: spec.max_scale,
            tilt_x: spec.tilt_x,
            tilt_z: spec.tilt_z,
        }
    }

    /// Builds the transform for a surface point.
    ///
    /// Draw order: yaw, tilt X (if enabled), tilt Z (if enabled), scale.
    pub fn synthesize(
        &self,
        position: Vec3,
        normal: Vec3,
        rng: &mut dyn RngCore,
    ) -> InstanceTransform {
        let yaw = rand_range(rng, 0.0, 360.0);
        let tilt_x = self.tilt_x.map_or(0.0, |t| t.sample(rng));
        let tilt_z = self.tilt_z.map_or(0.0, |t| t.sample(rng));
        let scale = rand_range(rng, self.min_scale, self.max_scale);

        let base = align_to_normal(normal) * Quat::from_rotation_y(yaw.to_radians());
        let tilt = Quat::from_euler(
            EulerRot::YXZ,
            0.0,
            tilt_x.to_radians(),
            tilt_z.to_radians(),
        );

        InstanceTransform {
            translation: position,
            rotation: (base * tilt).normalize(),
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::test_rng::SequenceRng;

    fn synth() -> TransformSynthesizer {
        TransformSynthesizer {
            min_scale: 2.0,
            max_scale: 3.5,
            tilt_x: None,
            tilt_z: None,
        }
    }

    #[test]
    fn untilted_instances_stand_on_the_normal() {
        let normal = Vec3::new(0.3, 1.0, -0.2).normalize();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..32 {
            let t = synth().synthesize(Vec3::new(1.0, 2.0, 3.0), normal, &mut rng);
            assert!(t.up().abs_diff_eq(normal, 1e-5));
            assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn scale_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..256 {
            let t = synth().synthesize(Vec3::ZERO, Vec3::Y, &mut rng);
            assert!(t.scale >= 2.0 && t.scale <= 3.5);
        }
    }

    #[test]
    fn draws_yaw_then_scale_when_tilt_disabled() {
        // yaw = 0.25 * 360 = 90 degrees, scale = 2.0 + 0.5 * 1.5
        let mut rng = SequenceRng::new(&[0.25, 0.5]);
        let t = synth().synthesize(Vec3::ZERO, Vec3::Y, &mut rng);
        assert_eq!(rng.draws, 2);
        assert!((t.scale - 2.75).abs() < 1e-6);
        let expected = Quat::from_rotation_y(90f32.to_radians());
        assert!(t.rotation.abs_diff_eq(expected, 1e-5) || t.rotation.abs_diff_eq(-expected, 1e-5));
    }

    #[test]
    fn tilt_ranges_add_draws_and_tilt_the_up_axis() {
        let s = TransformSynthesizer {
            tilt_x: Some(TiltRange::new(10.0, 20.0)),
            tilt_z: Some(TiltRange::new(-5.0, 5.0)),
            ..synth()
        };
        // yaw 0, tilt x 15, tilt z 0, scale 2.0
        let mut rng = SequenceRng::new(&[0.0, 0.5, 0.5, 0.0]);
        let t = s.synthesize(Vec3::ZERO, Vec3::Y, &mut rng);
        assert_eq!(rng.draws, 4);
        assert_eq!(t.scale, 2.0);
        let angle = t.up().angle_between(Vec3::Y).to_degrees();
        assert!((angle - 15.0).abs() < 1e-3);
    }

    #[test]
    fn tilt_applies_in_local_frame_after_alignment() {
        let s = TransformSynthesizer {
            tilt_x: Some(TiltRange::new(30.0, 30.0)),
            ..synth()
        };
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let mut rng = SequenceRng::new(&[0.0, 0.0, 0.0]);
        let t = s.synthesize(Vec3::ZERO, normal, &mut rng);
        // Tilt is relative to the surface normal, not to world up.
        let angle = t.up().angle_between(normal).to_degrees();
        assert!((angle - 30.0).abs() < 1e-3);
    }

    #[test]
    fn affine_matches_components() {
        let t = InstanceTransform {
            translation: Vec3::new(5.0, 1.0, -2.0),
            rotation: Quat::IDENTITY,
            scale: 2.0,
        };
        let p = t.to_affine().transform_point3(Vec3::ONE);
        assert!(p.abs_diff_eq(Vec3::new(7.0, 3.0, 0.0), 1e-6));
    }
}
