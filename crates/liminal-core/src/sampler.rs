//! Delay and status sampling
//!
//! Both draws are uniform and independent per request. The RNG is owned by a
//! [`Sampler`] so a fixed seed can be injected for reproducible runs and
//! tests; production seeds from OS entropy. The lock around the RNG is held
//! only for the duration of a single draw, never across an await point.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::CoreError;
use crate::status::{StatusEntry, StatusTable};

/// Inclusive bounds for the per-request response delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Default lower bound. The implemented formula is authoritative:
    /// 3000 ms plus up to 27000 ms, inclusive.
    pub const DEFAULT_MIN_MS: u64 = 3_000;

    /// Default upper bound.
    pub const DEFAULT_MAX_MS: u64 = 30_000;

    /// Build a range from millisecond bounds, rejecting an inverted range.
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Result<Self, CoreError> {
        if min_ms > max_ms {
            return Err(CoreError::InvalidDelayRange { min_ms, max_ms });
        }
        Ok(Self {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        })
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(Self::DEFAULT_MIN_MS),
            max: Duration::from_millis(Self::DEFAULT_MAX_MS),
        }
    }
}

/// Uniform sampler over delays and status table entries.
pub struct Sampler {
    rng: Mutex<StdRng>,
}

impl Sampler {
    /// Sampler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Sampler with a fixed seed, for reproducible draws.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw a delay uniformly from the inclusive range.
    pub fn sample_delay(&self, range: &DelayRange) -> Duration {
        let min_ms = range.min().as_millis() as u64;
        let max_ms = range.max().as_millis() as u64;
        let millis = self.lock().gen_range(min_ms..=max_ms);
        Duration::from_millis(millis)
    }

    /// Draw one entry uniformly from the flattened table.
    ///
    /// Tables are never empty; both variants carry static entries.
    pub fn sample_status<'t>(&self, table: &'t StatusTable) -> &'t StatusEntry {
        let index = self.lock().gen_range(0..table.len());
        &table.entries()[index]
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
