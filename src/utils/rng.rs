//! Random number generator construction.
//!
//! Training runs are reproducible when a seed is given; otherwise the
//! generator is seeded from OS entropy.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Create a generator from an explicit seed, or from entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
