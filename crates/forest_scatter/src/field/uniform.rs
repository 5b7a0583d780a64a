//! Field with a constant height and a constant surface normal.
use glam::Vec3;

use crate::field::HeightNormalField;

/// A plane over a rectangular footprint: flat by default, or with a fixed tilted normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField {
    /// Minimum corner in world space.
    pub origin: Vec3,
    /// Extent in world units.
    pub size: Vec3,
    /// Height above `origin.y` everywhere.
    pub height: f32,
    /// Unit normal reported everywhere.
    pub normal: Vec3,
}

impl UniformField {
    /// Flat field at the origin height.
    pub fn new(origin: Vec3, size: Vec3) -> Self {
        Self {
            origin,
            size,
            height: 0.0,
            normal: Vec3::Y,
        }
    }

    /// Flat field whose footprint is centered on the world origin.
    pub fn centered(width: f32, depth: f32) -> Self {
        Self::new(
            Vec3::new(-width * 0.5, 0.0, -depth * 0.5),
            Vec3::new(width, 0.0, depth),
        )
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Sets the reported normal. Degenerate normals fall back to up.
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal.normalize_or(Vec3::Y);
        self
    }

    /// Reports a normal tilted `degrees` away from up, around the Z axis.
    pub fn with_slope(self, degrees: f32) -> Self {
        let r = degrees.to_radians();
        self.with_normal(Vec3::new(r.sin(), r.cos(), 0.0))
    }
}

impl HeightNormalField for UniformField {
    fn origin(&self) -> Vec3 {
        self.origin
    }

    fn size(&self) -> Vec3 {
        self.size
    }

    fn sample_height(&self, _x: f32, _z: f32) -> f32 {
        self.height
    }

    fn sample_normal(&self, _normalized_x: f32, _normalized_z: f32) -> Vec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::slope_degrees;

    #[test]
    fn centered_footprint_is_symmetric() {
        let f = UniformField::centered(500.0, 300.0);
        assert_eq!(f.origin, Vec3::new(-250.0, 0.0, -150.0));
        assert_eq!(f.size, Vec3::new(500.0, 0.0, 300.0));
    }

    #[test]
    fn with_slope_produces_requested_angle() {
        let f = UniformField::centered(10.0, 10.0).with_slope(25.0);
        assert!((slope_degrees(f.sample_normal(0.3, 0.7)) - 25.0).abs() < 1e-3);
    }
}
