//! Deterministic random source shared by every stochastic decision.
//!
//! Wraps `ChaCha8Rng` so identical seeds produce identical runs on every
//! platform. It is passed by `&mut` to whatever needs randomness; nothing in
//! the simulation reaches for a thread-local or global generator.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform double in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    /// Uniform integer in [0, n). `n` must be non-zero.
    pub fn next_index(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }

    /// A fresh draw at or below `probability`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() <= probability
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
