//! Injected randomness for the generators.
//!
//! Generators never reach for a global RNG; they receive a [`RandomSource`]
//! so hosts can seed it from hardware and tests can replay exact sequences.

/// Source of bounded uniform random integers
pub trait RandomSource {
    /// Uniform value in `[lo, hi)`
    ///
    /// Returns `lo` when the range is empty.
    fn random_range(&mut self, lo: u16, hi: u16) -> u16;

    /// Returns `true` with a probability of `percent`%
    fn chance(&mut self, percent: u8) -> bool {
        self.random_range(0, 100) < u16::from(percent)
    }

    /// Uniform byte in `[lo, hi)`
    #[allow(clippy::cast_possible_truncation)]
    fn random_u8(&mut self, lo: u8, hi: u8) -> u8 {
        self.random_range(u16::from(lo), u16::from(hi)) as u8
    }

    /// Uniform byte in `[lo, hi]`
    #[allow(clippy::cast_possible_truncation)]
    fn random_u8_inclusive(&mut self, lo: u8, hi: u8) -> u8 {
        self.random_range(u16::from(lo), u16::from(hi) + 1) as u8
    }
}

/// Default [`RandomSource`] backed by `fastrand`
#[derive(Debug, Clone)]
pub struct FastRandom {
    rng: fastrand::Rng,
}

impl FastRandom {
    /// Create a generator from a seed
    ///
    /// On hardware the seed usually comes from the chip RNG.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl RandomSource for FastRandom {
    fn random_range(&mut self, lo: u16, hi: u16) -> u16 {
        if hi <= lo {
            return lo;
        }
        self.rng.u16(lo..hi)
    }
}
