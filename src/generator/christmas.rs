//! Christmas cycle
//!
//! Three timed phases of red and green, each held for three seconds:
//! red-dominant, green-dominant, then a bright/dim strobe. On top of every
//! phase single pixels randomly light up as warm white stars.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{FrameContext, Generator, UpdateTimer};
use crate::{
    color::{Rgb, scale_rgb_linear},
    random::RandomSource,
};

const UPDATE_INTERVAL: Duration = Duration::from_millis(250);
const PHASE_DURATION: Duration = Duration::from_millis(3000);

const STAR_CHANCE: u8 = 3;
const STAR: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 200,
};

const FULL: u8 = 255;
const DIM: u8 = 100;

/// Phase of the Christmas cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ChristmasPhase {
    /// Two red pixels, two green pixels
    #[default]
    RedDominant = 0,
    /// Same partition with the colors swapped
    GreenDominant = 1,
    /// Alternating red/green, toggling between bright and dim
    Sparkle = 2,
}

impl ChristmasPhase {
    pub const fn next(self) -> Self {
        match self {
            Self::RedDominant => Self::GreenDominant,
            Self::GreenDominant => Self::Sparkle,
            Self::Sparkle => Self::RedDominant,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Unscaled color of pixel `i` in this phase
    const fn color(self, i: usize, sparkle_on: bool) -> Rgb {
        let red_first = i % 4 < 2;
        match self {
            Self::RedDominant => red_or_green(red_first, FULL),
            Self::GreenDominant => red_or_green(!red_first, FULL),
            Self::Sparkle => red_or_green(i % 2 == 0, if sparkle_on { FULL } else { DIM }),
        }
    }
}

const fn red_or_green(red: bool, level: u8) -> Rgb {
    if red {
        Rgb { r: level, g: 0, b: 0 }
    } else {
        Rgb { r: 0, g: level, b: 0 }
    }
}

/// Christmas generator state
#[derive(Debug, Clone, Default)]
pub struct ChristmasGenerator {
    phase: ChristmasPhase,
    phase_start: Option<Instant>,
    sparkle_on: bool,
    timer: UpdateTimer,
}

impl ChristmasGenerator {
    pub const fn new() -> Self {
        Self {
            phase: ChristmasPhase::RedDominant,
            phase_start: None,
            sparkle_on: false,
            timer: UpdateTimer::new(),
        }
    }

    pub const fn phase(&self) -> ChristmasPhase {
        self.phase
    }

    /// Time the current phase started, `None` before the first frame
    pub const fn phase_start(&self) -> Option<Instant> {
        self.phase_start
    }

    pub const fn sparkle_on(&self) -> bool {
        self.sparkle_on
    }

    fn advance_phase(&mut self, now: Instant) {
        let phase_start = *self.phase_start.get_or_insert(now);
        if now.saturating_duration_since(phase_start) < PHASE_DURATION {
            return;
        }

        self.phase = self.phase.next();
        self.phase_start = Some(now);

        #[cfg(feature = "esp32-log")]
        println!("[Christmas] switched to phase {}", self.phase.index());
    }
}

impl Generator for ChristmasGenerator {
    fn step<R: RandomSource>(
        &mut self,
        now: Instant,
        ctx: &FrameContext,
        rng: &mut R,
        leds: &mut [Rgb],
    ) -> bool {
        if !self.timer.poll(now, UPDATE_INTERVAL) {
            return false;
        }

        self.advance_phase(now);
        if self.phase == ChristmasPhase::Sparkle {
            self.sparkle_on = !self.sparkle_on;
        }

        for (i, led) in leds.iter_mut().enumerate() {
            let color = if rng.chance(STAR_CHANCE) {
                STAR
            } else {
                self.phase.color(i, self.sparkle_on)
            };
            *led = scale_rgb_linear(color, ctx.brightness);
        }
        true
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
