//! Seedable randomness for generation and simulation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Session-owned random stream. Every random draw in the core goes through here.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Uniform in `[0, 1)`.
    pub fn unit_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1_u64 << 24) as f32
    }

    /// Uniform in `min..=max`.
    pub fn range_usize(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let range_size = (max_value - min_value) as u64 + 1;
        min_value + (self.next_u64() % range_size) as usize
    }

    /// Uniform index into a non-empty collection of `len` elements.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.unit_f32() < probability
    }

    pub fn angle(&mut self) -> f32 {
        self.unit_f32() * std::f32::consts::TAU
    }
}
