//! Per-pixel intensity field shared by the campfire and warm light effects
//!
//! Every pixel holds a `current` intensity that eases towards a randomly
//! redrawn `target`, then gets blended with its neighbours.

use crate::{
    math8::{approach8, diffuse8},
    random::RandomSource,
};

/// Parameters of one [`IntensityField::advance`] pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityDynamics {
    /// Percent chance that a pixel draws a new target
    pub change_chance: u8,
    /// Lowest new target (inclusive)
    pub target_min: u8,
    /// Highest new target (inclusive)
    pub target_max: u8,
    /// Smoothing divisor, `current` closes `1/smoothness` of the gap per pass
    pub smoothness: u8,
    /// Weight of the pixel itself against its neighbour average
    pub diffusion_weight: u8,
    /// Diffusion only applies when the pixel target is above this value
    pub diffusion_threshold: Option<u8>,
}

/// Current/target intensity pair for up to `N` pixels
#[derive(Debug, Clone)]
pub struct IntensityField<const N: usize> {
    current: [u8; N],
    target: [u8; N],
    initialized: bool,
}

impl<const N: usize> Default for IntensityField<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> IntensityField<N> {
    pub const fn new() -> Self {
        Self {
            current: [0; N],
            target: [0; N],
            initialized: false,
        }
    }

    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Seed both arrays with independent uniform values in `[min, max]`
    pub fn seed<R: RandomSource>(&mut self, rng: &mut R, min: u8, max: u8) {
        for (current, target) in self.current.iter_mut().zip(self.target.iter_mut()) {
            *current = rng.random_u8_inclusive(min, max);
            *target = rng.random_u8_inclusive(min, max);
        }
        self.initialized = true;
    }

    /// Seed once, subsequent calls are no-ops until [`Self::reset`]
    pub fn ensure_seeded<R: RandomSource>(&mut self, rng: &mut R, min: u8, max: u8) {
        if !self.initialized {
            self.seed(rng, min, max);
        }
    }

    /// Run one update pass over the first `len` pixels
    ///
    /// Neighbour values are taken from the state at the start of the pass,
    /// so the result does not depend on iteration direction.
    pub fn advance<R: RandomSource>(
        &mut self,
        len: usize,
        rng: &mut R,
        dynamics: &IntensityDynamics,
    ) {
        let len = len.min(N);
        let previous = self.current;

        for i in 0..len {
            if rng.chance(dynamics.change_chance) {
                self.target[i] = rng.random_u8_inclusive(dynamics.target_min, dynamics.target_max);
            }

            let target = self.target[i];
            let mut value = approach8(self.current[i], target, dynamics.smoothness);

            let interior = i > 0 && i + 1 < len;
            let gated = dynamics
                .diffusion_threshold
                .is_none_or(|threshold| target > threshold);
            if interior && gated {
                value = diffuse8(
                    value,
                    previous[i - 1],
                    previous[i + 1],
                    dynamics.diffusion_weight,
                );
            }

            self.current[i] = value;
        }
    }

    /// Current intensity of a pixel
    pub fn current(&self, index: usize) -> u8 {
        self.current.get(index).copied().unwrap_or(0)
    }

    /// Target intensity of a pixel
    pub fn target(&self, index: usize) -> u8 {
        self.target.get(index).copied().unwrap_or(0)
    }

    /// Overwrite the state of a pixel, used to set up deterministic scenes
    pub fn set(&mut self, index: usize, current: u8, target: u8) {
        if let (Some(c), Some(t)) = (self.current.get_mut(index), self.target.get_mut(index)) {
            *c = current;
            *t = target;
            self.initialized = true;
        }
    }

    pub fn reset(&mut self) {
        self.current = [0; N];
        self.target = [0; N];
        self.initialized = false;
    }
}
