//! Axis-aligned placement region over a height/normal field.
use glam::{Vec2, Vec3};

use crate::error::{Error, Result};
use crate::field::{field_center, HeightNormalField};

/// Where the region is centered.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RegionCenter {
    /// Center of the field's horizontal footprint.
    #[default]
    FieldCenter,
    /// An explicit world-space point, e.g. a selected object's position.
    Point(Vec3),
}

/// Rectangle of `extent.x` (width, along X) by `extent.y` (depth, along Z) world units.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestRegion {
    pub center: RegionCenter,
    pub extent: Vec2,
}

impl Default for ForestRegion {
    fn default() -> Self {
        Self {
            center: RegionCenter::FieldCenter,
            extent: Vec2::new(500.0, 500.0),
        }
    }
}

impl ForestRegion {
    /// Region of the given extent centered on the field.
    pub fn new(extent: Vec2) -> Self {
        Self {
            center: RegionCenter::FieldCenter,
            extent,
        }
    }

    /// Region of the given extent centered on a world point.
    pub fn centered_at(center: Vec3, extent: Vec2) -> Self {
        Self {
            center: RegionCenter::Point(center),
            extent,
        }
    }

    pub fn with_center(mut self, center: RegionCenter) -> Self {
        self.center = center;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.extent.x > 0.0 && self.extent.y > 0.0) || !self.extent.is_finite() {
            return Err(Error::InvalidConfig(
                "region extent must be finite and > 0 in both components".into(),
            ));
        }
        if let RegionCenter::Point(p) = self.center {
            if !p.is_finite() {
                return Err(Error::InvalidConfig("region center must be finite".into()));
            }
        }
        Ok(())
    }

    /// World-space center of the region.
    pub fn resolve_center<F: HeightNormalField + ?Sized>(&self, field: &F) -> Vec3 {
        match self.center {
            RegionCenter::FieldCenter => field_center(field),
            RegionCenter::Point(p) => p,
        }
    }

    /// Minimum and maximum corners of the horizontal footprint, at the center height.
    pub fn bounds<F: HeightNormalField + ?Sized>(&self, field: &F) -> (Vec3, Vec3) {
        let center = self.resolve_center(field);
        let half = Vec3::new(self.extent.x * 0.5, 0.0, self.extent.y * 0.5);
        (center - half, center + half)
    }

    /// The four footprint corners, counter-clockwise from the minimum corner.
    pub fn corners<F: HeightNormalField + ?Sized>(&self, field: &F) -> [Vec3; 4] {
        let (min, max) = self.bounds(field);
        [
            min,
            Vec3::new(max.x, min.y, min.z),
            max,
            Vec3::new(min.x, min.y, max.z),
        ]
    }

    /// Whether world `(x, z)` lies inside the footprint (edges included).
    pub fn contains<F: HeightNormalField + ?Sized>(&self, field: &F, x: f32, z: f32) -> bool {
        let (min, max) = self.bounds(field);
        x >= min.x && x <= max.x && z >= min.z && z <= max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::UniformField;

    #[test]
    fn field_center_is_default() {
        let field = UniformField::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1000.0, 50.0, 600.0));
        let region = ForestRegion::default();
        assert_eq!(region.resolve_center(&field), Vec3::new(500.0, 10.0, 300.0));
        assert_eq!(region.extent, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn explicit_point_overrides_field_center() {
        let field = UniformField::centered(100.0, 100.0);
        let region = ForestRegion::centered_at(Vec3::new(3.0, 4.0, 5.0), Vec2::new(10.0, 20.0));
        let (min, max) = region.bounds(&field);
        assert_eq!(min, Vec3::new(-2.0, 4.0, -5.0));
        assert_eq!(max, Vec3::new(8.0, 4.0, 15.0));
        assert!(region.contains(&field, 8.0, 15.0));
        assert!(!region.contains(&field, 8.1, 0.0));
    }

    #[test]
    fn corners_wind_around_footprint() {
        let field = UniformField::centered(100.0, 100.0);
        let corners = ForestRegion::new(Vec2::new(4.0, 2.0)).corners(&field);
        assert_eq!(corners[0], Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(corners[1], Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(corners[2], Vec3::new(2.0, 0.0, 1.0));
        assert_eq!(corners[3], Vec3::new(-2.0, 0.0, 1.0));
    }

    #[test]
    fn validate_rejects_empty_extent() {
        assert!(ForestRegion::new(Vec2::new(0.0, 10.0)).validate().is_err());
        assert!(ForestRegion::new(Vec2::new(10.0, -1.0)).validate().is_err());
        assert!(ForestRegion::new(Vec2::new(f32::NAN, 1.0)).validate().is_err());
        assert!(ForestRegion::centered_at(Vec3::splat(f32::INFINITY), Vec2::ONE)
            .validate()
            .is_err());
        assert!(ForestRegion::default().validate().is_ok());
    }
}
