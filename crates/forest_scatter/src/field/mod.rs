//! Height/normal fields the scatter pipeline places instances on.
//!
//! A [`HeightNormalField`] is the host's terrain: it answers height queries in world
//! XZ and normal queries in the field's own normalized `[0, 1]` space. The helpers in
//! this module do the world-to-normalized conversion and derive the slope used by the
//! density evaluator.
use glam::{Vec2, Vec3};

pub mod heightmap;
pub mod uniform;

pub use heightmap::HeightmapField;
pub use uniform::UniformField;

/// Terrain queried by the placement sampler.
pub trait HeightNormalField {
    /// World-space origin of the field (minimum X/Y/Z corner).
    fn origin(&self) -> Vec3;

    /// World-space size of the field. `x` is the width, `z` the depth.
    fn size(&self) -> Vec3;

    /// Surface height above `origin().y` at world coordinates `(x, z)`.
    fn sample_height(&self, x: f32, z: f32) -> f32;

    /// Surface normal at normalized field coordinates.
    fn sample_normal(&self, normalized_x: f32, normalized_z: f32) -> Vec3;
}

impl<F: HeightNormalField + ?Sized> HeightNormalField for &F {
    fn origin(&self) -> Vec3 {
        (**self).origin()
    }

    fn size(&self) -> Vec3 {
        (**self).size()
    }

    fn sample_height(&self, x: f32, z: f32) -> f32 {
        (**self).sample_height(x, z)
    }

    fn sample_normal(&self, normalized_x: f32, normalized_z: f32) -> Vec3 {
        (**self).sample_normal(normalized_x, normalized_z)
    }
}

/// Surface data resolved for one world XZ coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// World position with `y` set to the surface height.
    pub position: Vec3,
    /// Unit surface normal.
    pub normal: Vec3,
    /// Angle between `normal` and the up axis, in degrees.
    pub slope: f32,
}

/// Converts world XZ into the field's normalized `[0, 1]` coordinates.
///
/// Points outside the field map outside `[0, 1]`; fields decide how to treat them.
pub fn normalized_coords<F: HeightNormalField + ?Sized>(field: &F, x: f32, z: f32) -> Vec2 {
    let origin = field.origin();
    let size = field.size();
    Vec2::new((x - origin.x) / size.x, (z - origin.z) / size.z)
}

/// World-space center of the field's horizontal footprint, at the origin height.
pub fn field_center<F: HeightNormalField + ?Sized>(field: &F) -> Vec3 {
    let size = field.size();
    field.origin() + Vec3::new(size.x * 0.5, 0.0, size.z * 0.5)
}

/// Angle in degrees between `normal` and the up axis.
///
/// A degenerate normal is treated as pointing straight up.
pub fn slope_degrees(normal: Vec3) -> f32 {
    Vec3::Y.angle_between(normal.normalize_or(Vec3::Y)).to_degrees()
}

/// Queries height and normal for world `(x, z)`.
pub fn sample_surface<F: HeightNormalField + ?Sized>(field: &F, x: f32, z: f32) -> SurfaceSample {
    let height = field.sample_height(x, z) + field.origin().y;
    let uv = normalized_coords(field, x, z);
    let normal = field.sample_normal(uv.x, uv.y).normalize_or(Vec3::Y);
    SurfaceSample {
        position: Vec3::new(x, height, z),
        normal,
        slope: slope_degrees(normal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_coords_use_origin_and_size() {
        let field = UniformField::new(Vec3::new(-100.0, 5.0, 50.0), Vec3::new(200.0, 10.0, 100.0));
        let uv = normalized_coords(&field, 0.0, 100.0);
        assert!((uv.x - 0.5).abs() < 1e-6);
        assert!((uv.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn field_center_sits_at_origin_height() {
        let field = UniformField::new(Vec3::new(10.0, -3.0, 20.0), Vec3::new(100.0, 50.0, 40.0));
        assert_eq!(field_center(&field), Vec3::new(60.0, -3.0, 40.0));
    }

    #[test]
    fn slope_of_up_normal_is_zero() {
        assert!(slope_degrees(Vec3::Y).abs() < 1e-4);
        assert!(slope_degrees(Vec3::ZERO).abs() < 1e-4);
    }

    #[test]
    fn slope_of_tilted_normal_matches_angle() {
        let angle = 30.0_f32.to_radians();
        let normal = Vec3::new(angle.sin(), angle.cos(), 0.0);
        assert!((slope_degrees(normal) - 30.0).abs() < 1e-3);
        assert!((slope_degrees(Vec3::X) - 90.0).abs() < 1e-3);
    }

    #[test]
    fn sample_surface_adds_origin_height() {
        let field = UniformField::new(Vec3::new(0.0, 12.0, 0.0), Vec3::new(10.0, 10.0, 10.0))
            .with_height(3.0);
        let s = sample_surface(&field, 4.0, 6.0);
        assert_eq!(s.position, Vec3::new(4.0, 15.0, 6.0));
        assert_eq!(s.normal, Vec3::Y);
        assert!(s.slope.abs() < 1e-4);
    }
}
