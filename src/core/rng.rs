//! Seeded randomness for deck shuffles and AI deck generation.
//!
//! A match derives one named stream per purpose from its configured seed,
//! so adding draws to one stream (say, a larger AI deck) leaves the others
//! unchanged.
//!
//! ```
//! use duel_engine::core::GameRng;
//!
//! let root = GameRng::new(42);
//! let mut shuffles = root.stream("shuffle");
//! let mut ai_deck = root.stream("ai-deck");
//!
//! let a: Vec<_> = (0..8).map(|_| shuffles.stat(0..1000)).collect();
//! let b: Vec<_> = (0..8).map(|_| ai_deck.stat(0..1000)).collect();
//! assert_ne!(a, b);
//!
//! let mut replay = root.stream("shuffle");
//! assert_eq!(a, (0..8).map(|_| replay.stat(0..1000)).collect::<Vec<_>>());
//! ```

use std::hash::{Hash, Hasher};
use std::ops::{Range, RangeInclusive};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// ChaCha8 generator tagged with the seed it was built from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Named stream derived from this generator's seed. Stable across runs
    /// and platforms for the same seed and name.
    #[must_use]
    pub fn stream(&self, name: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A stat value (ATK, DEF) in `range`.
    pub fn stat(&mut self, range: Range<i64>) -> i64 {
        self.inner.gen_range(range)
    }

    /// A monster level in `range`.
    pub fn level(&mut self, range: RangeInclusive<u8>) -> u8 {
        self.inner.gen_range(range)
    }

    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.inner);
    }
}
