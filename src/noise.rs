//! Coherent 2D noise used to drive shake offsets
//!
//! Any source works as long as it is deterministic, continuous and stays
//! within [0, 1]. The shake engine remaps samples to [-1, 1].

use ::noise::{NoiseFn, Perlin};

/// A deterministic 2D coherent noise function with output in [0, 1]
pub trait NoiseSource {
    /// Sample the noise field at `(x, y)`
    fn sample(&self, x: f32, y: f32) -> f32;

    /// Sample remapped to [-1, 1]
    #[inline]
    fn sample_signed(&self, x: f32, y: f32) -> f32 {
        self.sample(x, y) * 2.0 - 1.0
    }
}

/// Classic gradient noise backed by the `noise` crate
#[derive(Debug, Clone, Copy)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    /// Permutation seed used by [`Default`]
    pub const DEFAULT_SEED: u32 = 0;
    /// The permutation table repeats every 256 lattice cells
    pub const PERIOD: f64 = 256.0;

    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f32, y: f32) -> f32 {
        if !x.is_finite() || !y.is_finite() {
            return 0.5;
        }
        // Wrap into one period so lattice indices always fit an isize
        let x = (x as f64).rem_euclid(Self::PERIOD);
        let y = (y as f64).rem_euclid(Self::PERIOD);
        let raw = self.perlin.get([x, y]);
        // Perlin output is nominally [-1, 1]; remap and clamp the overshoot
        ((raw * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}
