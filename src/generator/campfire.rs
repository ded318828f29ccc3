//! Campfire flicker
//!
//! Every pixel eases towards a randomly redrawn flame intensity, bleeds into
//! its neighbours and occasionally flares up. Red carries the intensity,
//! green adds a fifth of it for an orange tint. A brightness dependent floor
//! keeps glowing embers on screen even when a flame dies down.

use embassy_time::{Duration, Instant};

use super::{FrameContext, Generator, IntensityDynamics, IntensityField, UpdateTimer};
use crate::{color::Rgb, math8::scale_linear, random::RandomSource};

const UPDATE_INTERVAL: Duration = Duration::from_millis(70);

// Initial intensities, [50, 200)
const SEED_MIN: u8 = 50;
const SEED_MAX: u8 = 199;

const DYNAMICS: IntensityDynamics = IntensityDynamics {
    change_chance: 15,
    // New targets in [40, 220)
    target_min: 40,
    target_max: 219,
    smoothness: 10,
    // 4:1 self vs neighbour average, i.e. 20% spread
    diffusion_weight: 4,
    diffusion_threshold: None,
};

const GREEN_DIVISOR: u8 = 5;

const FLARE_CHANCE: u8 = 5;
const FLARE_RED_MIN: u8 = 20;
const FLARE_RED_MAX: u8 = 50;
const FLARE_GREEN_MIN: u8 = 5;
const FLARE_GREEN_MAX: u8 = 15;
const FLARE_GREEN_LIMIT: u8 = 60;

const EMBER_RED_DIVISOR: u8 = 10;
const EMBER_GREEN_DIVISOR: u8 = 20;

/// Campfire generator state
#[derive(Debug, Clone)]
pub struct CampfireGenerator<const N: usize> {
    field: IntensityField<N>,
    timer: UpdateTimer,
}

impl<const N: usize> Default for CampfireGenerator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CampfireGenerator<N> {
    pub const fn new() -> Self {
        Self {
            field: IntensityField::new(),
            timer: UpdateTimer::new(),
        }
    }

    /// Flame intensities, exposed for observation
    pub const fn field(&self) -> &IntensityField<N> {
        &self.field
    }

    /// Mutable access to the flame intensities
    pub fn field_mut(&mut self) -> &mut IntensityField<N> {
        &mut self.field
    }

    fn flame_color<R: RandomSource>(intensity: u8, ctx: &FrameContext, rng: &mut R) -> Rgb {
        let intensity = if ctx.campfire_brightness_scaling {
            scale_linear(intensity, ctx.brightness)
        } else {
            intensity
        };

        let mut red = intensity;
        let mut green = intensity / GREEN_DIVISOR;

        if rng.chance(FLARE_CHANCE) {
            red = red.saturating_add(rng.random_u8(FLARE_RED_MIN, FLARE_RED_MAX));
            green = green
                .saturating_add(rng.random_u8(FLARE_GREEN_MIN, FLARE_GREEN_MAX))
                .min(FLARE_GREEN_LIMIT);
        }

        Rgb {
            r: red.max(ctx.brightness / EMBER_RED_DIVISOR),
            g: green.max(ctx.brightness / EMBER_GREEN_DIVISOR),
            b: 0,
        }
    }
}

impl<const N: usize> Generator for CampfireGenerator<N> {
    fn step<R: RandomSource>(
        &mut self,
        now: Instant,
        ctx: &FrameContext,
        rng: &mut R,
        leds: &mut [Rgb],
    ) -> bool {
        self.field.ensure_seeded(rng, SEED_MIN, SEED_MAX);

        if !self.timer.poll(now, UPDATE_INTERVAL) {
            return false;
        }

        self.field.advance(leds.len(), rng, &DYNAMICS);

        for (i, led) in leds.iter_mut().take(N).enumerate() {
            *led = Self::flame_color(self.field.current(i), ctx, rng);
        }
        true
    }

    fn reset(&mut self) {
        self.field.reset();
        self.timer.reset();
    }
}
