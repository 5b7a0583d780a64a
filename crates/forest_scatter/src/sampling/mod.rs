//! Candidate sampling: clustering noise, density evaluation, and the rejection loop.
//!
//! Every random quantity in the crate is produced by [`rand01`] or [`rand_range`], each
//! consuming exactly one `next_u32` draw. This keeps the per-run draw order explicit and
//! reproducible for a seeded generator.
use rand::RngCore;

pub mod clustering;
pub mod density;
pub mod sampler;

pub use clustering::ClusteringNoise;
pub use density::DensityEvaluator;
pub use sampler::{Attempt, Candidate, PlacementSampler, SamplerStats};

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits of one draw so every result is exactly representable.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
}

/// Generate a random float between `min` and `max` from a single draw.
///
/// Reversed bounds are allowed; the result then lies between `max` and `min`.
#[inline]
pub(crate) fn rand_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + rand01(rng) * (max - min)
}

#[cfg(test)]
pub(crate) mod test_rng {
    use rand::RngCore;

    /// Returns the same value for every draw.
    pub struct FixedRng {
        pub value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    /// Replays a fixed list of unit floats (cycling) and counts draws.
    pub struct SequenceRng {
        values: Vec<f32>,
        pub draws: usize,
    }

    impl SequenceRng {
        pub fn new(values: &[f32]) -> Self {
            Self {
                values: values.to_vec(),
                draws: 0,
            }
        }
    }

    /// Encodes `u` in [0, 1) so that `rand01` decodes it exactly for 24-bit values.
    pub fn encode01(u: f32) -> u32 {
        ((u.clamp(0.0, 1.0) * 16_777_216.0) as u32).min(16_777_215) << 8
    }

    impl RngCore for SequenceRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.values[self.draws % self.values.len()];
            self.draws += 1;
            encode01(v)
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_rng::{FixedRng, SequenceRng};
    use super::*;

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_stays_below_one_for_max_input() {
        let mut rng = FixedRng { value: u32::MAX };
        let result = rand01(&mut rng);
        assert!(result < 1.0);
        assert!(result > 0.999_999);
    }

    #[test]
    fn rand01_midpoint() {
        let mut rng = FixedRng { value: 1 << 31 };
        assert_eq!(rand01(&mut rng), 0.5);
    }

    #[test]
    fn rand_range_maps_single_draw() {
        let mut rng = SequenceRng::new(&[0.25]);
        assert_eq!(rand_range(&mut rng, 2.0, 4.0), 2.5);
        assert_eq!(rng.draws, 1);
    }

    #[test]
    fn rand_range_handles_reversed_bounds() {
        let mut rng = SequenceRng::new(&[0.5]);
        assert_eq!(rand_range(&mut rng, 10.0, -10.0), 0.0);
    }
}
