use std::time::Duration;

use criterion::{Criterion, Throughput};
use forest_scatter::prelude::HeightmapField;
use glam::Vec3;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Rolling hills over a 1024 x 1024 footprint centered on the origin.
#[allow(dead_code)]
pub fn rolling_hills(resolution: usize) -> HeightmapField {
    HeightmapField::from_fn(
        Vec3::new(-512.0, 0.0, -512.0),
        Vec3::new(1024.0, 120.0, 1024.0),
        (resolution, resolution),
        |x, z| (x * 0.011).sin() * 35.0 + (z * 0.017).cos() * 25.0 + 60.0,
    )
    .expect("valid heightmap")
}
