//! Random number generation for mine placement and fallback moves.
//!
//! Uses the `rand` crate with `SmallRng` (xoshiro256++) which is fast and
//! works on wasm32. Entropy is sourced from `getrandom` (browser crypto
//! API in the browser, OS entropy natively).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A seedable RNG wrapper.
///
/// Can be seeded for deterministic replay in tests, or created from
/// system entropy.
pub struct GameRng {
    inner: SmallRng,
}

impl GameRng {
    /// Create from system entropy.
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Create with a specific seed for deterministic behavior.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate a random usize in [0, max).
    #[inline(always)]
    pub fn gen_range(&mut self, max: usize) -> usize {
        self.inner.random_range(0..max)
    }

    /// Pick a uniformly-random element of a non-empty slice.
    #[inline(always)]
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.gen_range(items.len())]
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new()
    }
}
