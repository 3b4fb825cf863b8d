//! Deterministic random number generation for combat and encounter rolls.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for different purposes
//!   (encounter rolls vs. damage variance vs. capture attempts)
//!
//! Every random draw in the engine flows through [`GameRng`], so a fixed
//! seed makes damage formulas and encounter generation exactly reproducible
//! in tests.
//!
//! ```
//! use menagerie::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.gen_range(2..81);
//! assert!((2..81).contains(&roll));
//!
//! // Same seed, same sequence.
//! let mut rng2 = GameRng::new(42);
//! assert_eq!(rng2.gen_range(2..81), roll);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG for all game randomness.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
/// Supports context-based independent streams so that, for example, encounter
/// generation and damage variance cannot perturb each other's sequences.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// For normal play. Tests should use [`GameRng::new`] with a fixed seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Create an independent stream for a specific context.
    ///
    /// Useful for separating randomness domains (e.g., encounter rolls vs
    /// damage variance). The same context always produces the same stream
    /// from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Generate a random level in the given inclusive range.
    pub fn gen_level(&mut self, range: std::ops::RangeInclusive<u32>) -> u32 {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Generate a uniform float in `[lo, hi)`.
    ///
    /// Used for damage variance (`U(0.85, 1.0)`) and encounter stat
    /// variation (`U(0.9, 1.1)`).
    pub fn gen_uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.inner.gen_range(lo..hi)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
