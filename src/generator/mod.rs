//! Generator system with compile-time known mode variants
//!
//! Each lighting mode owns a generator that keeps its working state between
//! frames. Generators are stored in an enum to avoid heap allocations and the
//! controller recreates the active one whenever the mode changes, so state is
//! never shared across modes.

mod beatsin;
mod campfire;
mod christmas;
mod intensity;
mod normal;
mod warm_light;

use embassy_time::{Duration, Instant};

pub use beatsin::BeatsinGenerator;
pub use campfire::CampfireGenerator;
pub use christmas::{ChristmasGenerator, ChristmasPhase};
pub use intensity::{IntensityDynamics, IntensityField};
pub use normal::NormalGenerator;
pub use warm_light::WarmLightGenerator;

use crate::{color::Rgb, config::WarmConfig, mode::Mode, random::RandomSource};

/// Read-only inputs shared by every generator for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub static_color: Rgb,
    pub brightness: u8,
    pub warm: WarmConfig,
    /// Scale the campfire intensity by `brightness`
    pub campfire_brightness_scaling: bool,
}

pub trait Generator {
    /// Advance the animation and draw into `leds`
    ///
    /// Returns `false` if the generator's update interval has not elapsed yet;
    /// the frame is left untouched in that case.
    fn step<R: RandomSource>(
        &mut self,
        now: Instant,
        ctx: &FrameContext,
        rng: &mut R,
        leds: &mut [Rgb],
    ) -> bool;

    /// Drop all accumulated state, next step starts from scratch
    fn reset(&mut self);
}

/// Timestamp based rate limiter
///
/// A fresh timer is always due, so a newly activated generator draws on its
/// first step.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateTimer {
    last_update: Option<Instant>,
}

impl UpdateTimer {
    pub const fn new() -> Self {
        Self { last_update: None }
    }

    /// Check whether `interval` has elapsed and mark `now` as the last update
    /// if it has.
    pub fn poll(&mut self, now: Instant, interval: Duration) -> bool {
        let due = match self.last_update {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= interval,
        };
        if due {
            self.last_update = Some(now);
        }
        due
    }

    pub fn reset(&mut self) {
        self.last_update = None;
    }
}

/// Animation state slot - enum containing the generator of every mode
#[derive(Debug, Clone)]
pub enum AnimationState<const N: usize> {
    Normal(NormalGenerator),
    Campfire(CampfireGenerator<N>),
    Christmas(ChristmasGenerator),
    WarmLight(WarmLightGenerator<N>),
    Beatsin(BeatsinGenerator),
}

impl<const N: usize> AnimationState<N> {
    /// Create the pristine state of a mode
    pub const fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Normal => Self::Normal(NormalGenerator::new()),
            Mode::Campfire => Self::Campfire(CampfireGenerator::new()),
            Mode::Christmas => Self::Christmas(ChristmasGenerator::new()),
            Mode::WarmLight => Self::WarmLight(WarmLightGenerator::new()),
            Mode::Beatsin => Self::Beatsin(BeatsinGenerator::new()),
        }
    }

    /// Get the mode this state belongs to
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Normal(_) => Mode::Normal,
            Self::Campfire(_) => Mode::Campfire,
            Self::Christmas(_) => Mode::Christmas,
            Self::WarmLight(_) => Mode::WarmLight,
            Self::Beatsin(_) => Mode::Beatsin,
        }
    }

    /// Step the active generator
    pub fn step<R: RandomSource>(
        &mut self,
        now: Instant,
        ctx: &FrameContext,
        rng: &mut R,
        leds: &mut [Rgb],
    ) -> bool {
        match self {
            Self::Normal(generator) => generator.step(now, ctx, rng, leds),
            Self::Campfire(generator) => generator.step(now, ctx, rng, leds),
            Self::Christmas(generator) => generator.step(now, ctx, rng, leds),
            Self::WarmLight(generator) => generator.step(now, ctx, rng, leds),
            Self::Beatsin(generator) => generator.step(now, ctx, rng, leds),
        }
    }

    /// Reset the generator state
    pub fn reset(&mut self) {
        match self {
            Self::Normal(generator) => Generator::reset(generator),
            Self::Campfire(generator) => Generator::reset(generator),
            Self::Christmas(generator) => Generator::reset(generator),
            Self::WarmLight(generator) => Generator::reset(generator),
            Self::Beatsin(generator) => Generator::reset(generator),
        }
    }
}
