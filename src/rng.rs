//! Deterministic random number generation
//!
//! Every wind component is drawn from its own ChaCha stream seeded from a
//! single `u64`. Seeds are handed out by a [`SeedAllocator`] that is threaded
//! through column construction instead of living in global state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, WindFieldError};

/// Number of seeds consumed by one pressure level (u and v).
pub const SEEDS_PER_LEVEL: u64 = 2;

/// Hands out seeds in strictly increasing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedAllocator {
    next: u64,
}

impl SeedAllocator {
    pub fn new(seed: u64) -> Self {
        Self { next: seed }
    }

    /// Seed the next allocation will start from
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Reserve the `(u, v)` seed pair for one level and advance by two.
    pub fn next_pair(&mut self) -> (u64, u64) {
        let u = self.next;
        let v = u.wrapping_add(1);
        self.next = u.wrapping_add(SEEDS_PER_LEVEL);
        (u, v)
    }
}

impl Default for SeedAllocator {
    fn default() -> Self {
        Self::new(1234)
    }
}

fn normal(standard_deviation: f64) -> Result<Normal<f64>> {
    if !standard_deviation.is_finite() || standard_deviation < 0.0 {
        return Err(WindFieldError::InvalidStandardDeviation {
            value: standard_deviation,
        });
    }
    Normal::new(0.0, standard_deviation).map_err(|_| WindFieldError::InvalidStandardDeviation {
        value: standard_deviation,
    })
}

/// Draw `length` zero-mean normal samples from a fresh stream seeded with `seed`.
pub fn generate_field(seed: u64, length: usize, standard_deviation: f64) -> Result<Vec<f64>> {
    let dist = normal(standard_deviation)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(dist.sample_iter(&mut rng).take(length).collect())
}
