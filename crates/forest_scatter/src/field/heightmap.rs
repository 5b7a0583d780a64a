//! Grid-backed height field with bilinear heights and interpolated vertex normals.
use glam::{Vec2, Vec3};

use crate::error::{Error, Result};
use crate::field::HeightNormalField;

/// Height samples on a regular vertex grid spanning `size.x` by `size.z`.
///
/// Heights are stored row-major (`z` rows of `x` vertices) as offsets above
/// `origin.y`. Normals are computed once per vertex by central differences and
/// blended bilinearly on lookup. Queries outside the footprint clamp to the edge.
#[derive(Debug, Clone)]
pub struct HeightmapField {
    origin: Vec3,
    size: Vec3,
    width: usize,
    depth: usize,
    heights: Vec<f32>,
    normals: Vec<Vec3>,
}

impl HeightmapField {
    /// Builds a field from `width * depth` height samples.
    pub fn new(
        origin: Vec3,
        size: Vec3,
        resolution: (usize, usize),
        heights: Vec<f32>,
    ) -> Result<Self> {
        let (width, depth) = resolution;
        if width < 2 || depth < 2 {
            return Err(Error::InvalidConfig(
                "heightmap resolution must be >= 2 in both directions".into(),
            ));
        }
        if size.x <= 0.0 || size.z <= 0.0 {
            return Err(Error::InvalidConfig(
                "heightmap size must be > 0 in x and z".into(),
            ));
        }
        if heights.len() != width * depth {
            return Err(Error::InvalidConfig(format!(
                "heightmap expects {} samples, got {}",
                width * depth,
                heights.len()
            )));
        }

        let mut field = Self {
            origin,
            size,
            width,
            depth,
            heights,
            normals: Vec::new(),
        };
        field.normals = field.vertex_normals();
        Ok(field)
    }

    /// Builds a field by evaluating `f(world_x, world_z)` at every vertex.
    pub fn from_fn(
        origin: Vec3,
        size: Vec3,
        resolution: (usize, usize),
        mut f: impl FnMut(f32, f32) -> f32,
    ) -> Result<Self> {
        let (width, depth) = resolution;
        let step = Vec2::new(
            size.x / (width.max(2) - 1) as f32,
            size.z / (depth.max(2) - 1) as f32,
        );
        let mut heights = Vec::with_capacity(width * depth);
        for iz in 0..depth {
            for ix in 0..width {
                let x = origin.x + ix as f32 * step.x;
                let z = origin.z + iz as f32 * step.y;
                heights.push(f(x, z));
            }
        }
        Self::new(origin, size, resolution, heights)
    }

    /// Vertex counts along `(x, z)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// Height above the origin at a vertex, with indices clamped to the grid.
    pub fn height_at(&self, ix: isize, iz: isize) -> f32 {
        self.heights[self.index(ix, iz)]
    }

    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.size.x / (self.width - 1) as f32,
            self.size.z / (self.depth - 1) as f32,
        )
    }

    fn index(&self, ix: isize, iz: isize) -> usize {
        let x = ix.clamp(0, self.width as isize - 1) as usize;
        let z = iz.clamp(0, self.depth as isize - 1) as usize;
        z * self.width + x
    }

    fn vertex_normals(&self) -> Vec<Vec3> {
        let cell = self.cell_size();
        let mut out = Vec::with_capacity(self.heights.len());
        for iz in 0..self.depth as isize {
            for ix in 0..self.width as isize {
                let x0 = (ix - 1).max(0);
                let x1 = (ix + 1).min(self.width as isize - 1);
                let z0 = (iz - 1).max(0);
                let z1 = (iz + 1).min(self.depth as isize - 1);

                let dhdx = (self.height_at(x1, iz) - self.height_at(x0, iz))
                    / ((x1 - x0) as f32 * cell.x);
                let dhdz = (self.height_at(ix, z1) - self.height_at(ix, z0))
                    / ((z1 - z0) as f32 * cell.y);

                out.push(Vec3::new(-dhdx, 1.0, -dhdz).normalize_or(Vec3::Y));
            }
        }
        out
    }

    /// Lower-left vertex and fractional offsets for normalized coordinates.
    fn locate(&self, u: f32, v: f32) -> (isize, isize, f32, f32) {
        let fx = u.clamp(0.0, 1.0) * (self.width - 1) as f32;
        let fz = v.clamp(0.0, 1.0) * (self.depth - 1) as f32;
        let ix = (fx.floor() as isize).min(self.width as isize - 2);
        let iz = (fz.floor() as isize).min(self.depth as isize - 2);
        (ix, iz, fx - ix as f32, fz - iz as f32)
    }
}

impl HeightNormalField for HeightmapField {
    fn origin(&self) -> Vec3 {
        self.origin
    }

    fn size(&self) -> Vec3 {
        self.size
    }

    fn sample_height(&self, x: f32, z: f32) -> f32 {
        let u = (x - self.origin.x) / self.size.x;
        let v = (z - self.origin.z) / self.size.z;
        let (ix, iz, tx, tz) = self.locate(u, v);

        let h00 = self.height_at(ix, iz);
        let h10 = self.height_at(ix + 1, iz);
        let h01 = self.height_at(ix, iz + 1);
        let h11 = self.height_at(ix + 1, iz + 1);

        let a = h00 + (h10 - h00) * tx;
        let b = h01 + (h11 - h01) * tx;
        a + (b - a) * tz
    }

    fn sample_normal(&self, normalized_x: f32, normalized_z: f32) -> Vec3 {
        let (ix, iz, tx, tz) = self.locate(normalized_x, normalized_z);

        let n00 = self.normals[self.index(ix, iz)];
        let n10 = self.normals[self.index(ix + 1, iz)];
        let n01 = self.normals[self.index(ix, iz + 1)];
        let n11 = self.normals[self.index(ix + 1, iz + 1)];

        n00.lerp(n10, tx)
            .lerp(n01.lerp(n11, tx), tz)
            .normalize_or(Vec3::Y)
    }
}
