//! Beatsin scanner
//!
//! A single pixel in the static color swings back and forth along the strip
//! on a sine wave, leaving a trail that fades out a little on every step.

use core::f32::consts::TAU;

use embassy_time::Instant;

use super::{FrameContext, Generator};
use crate::{
    color::{Rgb, scale_rgb_linear},
    math8::fade8,
    random::RandomSource,
};

const BEATS_PER_MINUTE: u64 = 20;
const BEAT_PERIOD_MS: u64 = 60_000 / BEATS_PER_MINUTE;

/// Amount (of 255) every pixel loses per step
const FADE_AMOUNT: u8 = 10;

/// Beatsin generator state
#[derive(Debug, Clone, Default)]
pub struct BeatsinGenerator {
    /// Phase origin, set on the first step after activation
    origin: Option<Instant>,
    position: Option<usize>,
}

impl BeatsinGenerator {
    pub const fn new() -> Self {
        Self {
            origin: None,
            position: None,
        }
    }

    /// Index lit by the last step
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// Sine position in `[0, len - 1]` after `elapsed_ms` from the origin
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn position_at(elapsed_ms: u64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let last = len - 1;
        let phase = (elapsed_ms % BEAT_PERIOD_MS) as f32 / BEAT_PERIOD_MS as f32;
        let wave = (libm::sinf(phase * TAU) + 1.0) / 2.0;
        let position = libm::roundf(wave * last as f32);
        (position.max(0.0) as usize).min(last)
    }
}

impl Generator for BeatsinGenerator {
    fn step<R: RandomSource>(
        &mut self,
        now: Instant,
        ctx: &FrameContext,
        _rng: &mut R,
        leds: &mut [Rgb],
    ) -> bool {
        if leds.is_empty() {
            return false;
        }

        let origin = *self.origin.get_or_insert(now);
        let elapsed_ms = now.saturating_duration_since(origin).as_millis();

        for led in leds.iter_mut() {
            led.r = fade8(led.r, FADE_AMOUNT);
            led.g = fade8(led.g, FADE_AMOUNT);
            led.b = fade8(led.b, FADE_AMOUNT);
        }

        let position = Self::position_at(elapsed_ms, leds.len());
        leds[position] = scale_rgb_linear(ctx.static_color, ctx.brightness);
        self.position = Some(position);
        true
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
