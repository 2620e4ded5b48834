//! Payment reference assignment for new students.
//!
//! The source is injected into the API state so tests can pin the values
//! handed out, while production draws them from a seeded `StdRng`.

use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
use mockall::automock;

/// Range every payment reference falls into.
pub const PAYMENT_REFERENCE_RANGE: RangeInclusive<i32> = 1..=4;

/// Source of payment references. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait PaymentReferenceSource {
    /// Draw the next reference, always within [`PAYMENT_REFERENCE_RANGE`].
    fn next_reference(&self) -> i32;
}

/// Uniform payment references backed by a `StdRng`.
pub struct SeededReferenceSource {
    rng: Mutex<StdRng>,
}

impl SeededReferenceSource {
    /// Deterministic sequence for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Sequence seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl PaymentReferenceSource for SeededReferenceSource {
    fn next_reference(&self) -> i32 {
        // A panic while holding the lock cannot leave the RNG in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(PAYMENT_REFERENCE_RANGE)
    }
}
