//! Top-down PNG previews of generated forests.
use std::path::Path;

use forest_scatter::prelude::*;
use glam::Vec2;
use image::{Rgb, RgbImage};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a console subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

/// Image size, mapped world rectangle and styling of a preview.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// Minimum world `(x, z)` corner shown in the image.
    pub world_min: Vec2,
    /// World `(width, depth)` shown in the image.
    pub world_extent: Vec2,
    pub background: [u8; 3],
    /// Disc radius in pixels for an instance of scale 1.
    pub base_radius_px: f32,
    /// Shade the background by terrain slope.
    pub shade_slope: bool,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), world_min: Vec2, world_extent: Vec2) -> Self {
        Self {
            image_size,
            world_min,
            world_extent,
            background: [235, 232, 220],
            base_radius_px: 1.5,
            shade_slope: true,
        }
    }

    /// Frames the footprint of `region` on `field`.
    pub fn for_region<F: HeightNormalField + ?Sized>(
        image_size: (u32, u32),
        region: &ForestRegion,
        field: &F,
    ) -> Self {
        let (min, _) = region.bounds(field);
        Self::new(image_size, Vec2::new(min.x, min.z), region.extent)
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_base_radius(mut self, radius_px: f32) -> Self {
        self.base_radius_px = radius_px;
        self
    }

    pub fn with_slope_shading(mut self, shade: bool) -> Self {
        self.shade_slope = shade;
        self
    }

    fn pixel_to_world(&self, px: u32, py: u32) -> Vec2 {
        let (w, h) = self.image_size;
        let u = (px as f32 + 0.5) / w as f32;
        let v = (py as f32 + 0.5) / h as f32;
        self.world_min + Vec2::new(u, v) * self.world_extent
    }

    fn world_to_pixel(&self, x: f32, z: f32) -> Vec2 {
        let (w, h) = self.image_size;
        let uv = (Vec2::new(x, z) - self.world_min) / self.world_extent;
        uv * Vec2::new(w as f32, h as f32)
    }
}

fn shade(base: [u8; 3], factor: f32) -> Rgb<u8> {
    Rgb(base.map(|c| (c as f32 * factor).clamp(0.0, 255.0) as u8))
}

/// Renders instances as discs tinted with their leaf color, drawn in placement order.
pub fn render_forest_to_png<F, M>(
    result: &GenerationResult<M>,
    field: &F,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()>
where
    F: HeightNormalField + ?Sized,
{
    let (w, h) = rc.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

    if rc.shade_slope {
        for py in 0..h {
            for px in 0..w {
                let p = rc.pixel_to_world(px, py);
                let slope = sample_surface(field, p.x, p.y).slope;
                let factor = 1.0 - (slope / 90.0).clamp(0.0, 1.0) * 0.6;
                img.put_pixel(px, py, shade(rc.background, factor));
            }
        }
    }

    for inst in &result.instances {
        let t = &inst.transform;
        let center = rc.world_to_pixel(t.translation.x, t.translation.z);
        let radius = (rc.base_radius_px * t.scale).max(1.0);
        let [r, g, b, _] = inst.leaf_color.to_rgba8();
        let color = Rgb([r, g, b]);

        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = ((center.x + radius).ceil() as i64).clamp(0, w as i64) as u32;
        let max_y = ((center.y + radius).ceil() as i64).clamp(0, h as i64) as u32;
        for py in min_y..max_y {
            for px in min_x..max_x {
                let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center;
                if d.length_squared() <= radius * radius {
                    img.put_pixel(px, py, color);
                }
            }
        }
    }

    img.save(path.as_ref())?;
    tracing::info!("Wrote {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn region_framing_maps_corners_to_image_edges() {
        let field = UniformField::centered(400.0, 400.0);
        let region =
            ForestRegion::centered_at(Vec3::new(50.0, 0.0, -20.0), Vec2::new(100.0, 40.0));
        let rc = RenderConfig::for_region((200, 80), &region, &field)
            .with_background([10, 20, 30])
            .with_slope_shading(false);
        assert_eq!(rc.world_min, Vec2::new(0.0, -40.0));
        assert_eq!(rc.background, [10, 20, 30]);
        assert!(!rc.shade_slope);
        assert_eq!(rc.world_to_pixel(0.0, -40.0), Vec2::ZERO);
        assert_eq!(rc.world_to_pixel(100.0, 0.0), Vec2::new(200.0, 80.0));
        assert!(rc
            .pixel_to_world(0, 0)
            .abs_diff_eq(Vec2::new(0.25, -39.75), 1e-4));
    }
}
