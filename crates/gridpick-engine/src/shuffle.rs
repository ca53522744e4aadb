//! Uniform random permutation primitive for the pick-order engine.
//!
//! The engine never calls a RNG directly; it takes a [`Shuffler`] so tests
//! can substitute a deterministic double without weakening the production
//! contract (uniform over permutations of the tied group, not reproducible
//! across runs).

use gridpick_core::domain::UserId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Produces uniform random permutations of user groups.
pub trait Shuffler {
    /// Permutes `users` in place, uniformly over all permutations.
    fn shuffle_users(&mut self, users: &mut [UserId]);
}

/// Production shuffler seeded from the operating system.
///
/// Fisher-Yates via [`SliceRandom::shuffle`]; not reproducible across runs.
#[derive(Debug)]
pub struct OsShuffler {
    rng: StdRng,
}

impl OsShuffler {
    pub fn new() -> Self {
        OsShuffler {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for OsShuffler {
    fn default() -> Self {
        OsShuffler::new()
    }
}

impl Shuffler for OsShuffler {
    fn shuffle_users(&mut self, users: &mut [UserId]) {
        users.shuffle(&mut self.rng);
    }
}

/// Deterministic shuffler for tests and reproducible runs.
///
/// Still a valid uniform shuffle for a fixed seed stream, so it satisfies
/// the engine's contract while making outcomes repeatable.
#[derive(Debug)]
pub struct SeededShuffler {
    rng: ChaCha8Rng,
}

impl SeededShuffler {
    pub fn from_seed(seed: u64) -> Self {
        SeededShuffler {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle_users(&mut self, users: &mut [UserId]) {
        users.shuffle(&mut self.rng);
    }
}
