//! Static color fill
//!
//! Fills all LEDs with the configured color scaled by the global brightness.

use embassy_time::Instant;

use super::{FrameContext, Generator};
use crate::{
    color::{Rgb, scale_rgb_linear},
    random::RandomSource,
};

/// Normal mode - stateless, redraws on every step
#[derive(Debug, Clone, Default)]
pub struct NormalGenerator;

impl NormalGenerator {
    pub const fn new() -> Self {
        Self
    }
}

impl Generator for NormalGenerator {
    fn step<R: RandomSource>(
        &mut self,
        _now: Instant,
        ctx: &FrameContext,
        _rng: &mut R,
        leds: &mut [Rgb],
    ) -> bool {
        leds.fill(scale_rgb_linear(ctx.static_color, ctx.brightness));
        true
    }

    fn reset(&mut self) {
        // No state to reset for this generator
    }
}
