//! Warm light glow
//!
//! Same easing field as the campfire, tuned for a calm, nearly uniform white:
//! the configured color temperature is scaled by each pixel's intensity.

use embassy_time::{Duration, Instant};

use super::{FrameContext, Generator, IntensityDynamics, IntensityField, UpdateTimer};
use crate::{
    color::{Rgb, scale_rgb_linear},
    config::WarmConfig,
    random::RandomSource,
};

// Pixels with a low target dim on their own instead of being held up by
// brighter neighbours.
const DIFFUSION_THRESHOLD: u8 = 50;
// 9:1 self vs neighbour average, i.e. 10% spread
const DIFFUSION_WEIGHT: u8 = 9;

/// Warm light generator state
#[derive(Debug, Clone)]
pub struct WarmLightGenerator<const N: usize> {
    field: IntensityField<N>,
    timer: UpdateTimer,
}

impl<const N: usize> Default for WarmLightGenerator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> WarmLightGenerator<N> {
    pub const fn new() -> Self {
        Self {
            field: IntensityField::new(),
            timer: UpdateTimer::new(),
        }
    }

    pub const fn field(&self) -> &IntensityField<N> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut IntensityField<N> {
        &mut self.field
    }

    const fn dynamics(config: WarmConfig) -> IntensityDynamics {
        IntensityDynamics {
            change_chance: config.change_chance(),
            target_min: config.min_brightness(),
            target_max: config.max_brightness(),
            smoothness: config.smoothness(),
            diffusion_weight: DIFFUSION_WEIGHT,
            diffusion_threshold: Some(DIFFUSION_THRESHOLD),
        }
    }
}

impl<const N: usize> Generator for WarmLightGenerator<N> {
    fn step<R: RandomSource>(
        &mut self,
        now: Instant,
        ctx: &FrameContext,
        rng: &mut R,
        leds: &mut [Rgb],
    ) -> bool {
        let config = ctx.warm;
        self.field
            .ensure_seeded(rng, config.min_brightness(), config.max_brightness());

        let interval = Duration::from_millis(u64::from(config.update_speed_ms()));
        if !self.timer.poll(now, interval) {
            return false;
        }

        self.field.advance(leds.len(), rng, &Self::dynamics(config));

        let base = config.color_temperature().base_color();
        for (i, led) in leds.iter_mut().take(N).enumerate() {
            *led = scale_rgb_linear(base, self.field.current(i));
        }
        true
    }

    fn reset(&mut self) {
        self.field.reset();
        self.timer.reset();
    }
}
