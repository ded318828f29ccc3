//! Runtime configuration records and their documented defaults.
//!
//! Every constructor clamps its inputs, so a [`WarmConfig`] can never hold an
//! out-of-range value regardless of where it came from (network, storage or
//! an input device).

use crate::{Rgb, bounds::RenderingBounds, color::ColorTemperature, mode::Mode};

pub const CHANGE_CHANCE_MIN: u8 = 1;
pub const CHANGE_CHANCE_MAX: u8 = 100;
pub const UPDATE_SPEED_MIN_MS: u16 = 20;
pub const UPDATE_SPEED_MAX_MS: u16 = 200;
pub const SMOOTHNESS_MIN: u8 = 1;
pub const SMOOTHNESS_MAX: u8 = 20;

pub const DEFAULT_MODE: Mode = Mode::WarmLight;
pub const DEFAULT_STATIC_COLOR: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const DEFAULT_BRIGHTNESS: u8 = 50;

const DEFAULT_COLOR_TEMPERATURE: ColorTemperature = ColorTemperature::K3000;
const DEFAULT_CHANGE_CHANCE: u8 = 5;
const DEFAULT_MIN_BRIGHTNESS: u8 = 220;
const DEFAULT_MAX_BRIGHTNESS: u8 = 255;
const DEFAULT_UPDATE_SPEED_MS: u16 = 80;
const DEFAULT_SMOOTHNESS: u8 = 15;

/// Tuning of the warm light generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmConfig {
    color_temperature: ColorTemperature,
    change_chance: u8,
    min_brightness: u8,
    max_brightness: u8,
    update_speed_ms: u16,
    smoothness: u8,
}

impl Default for WarmConfig {
    fn default() -> Self {
        Self {
            color_temperature: DEFAULT_COLOR_TEMPERATURE,
            change_chance: DEFAULT_CHANGE_CHANCE,
            min_brightness: DEFAULT_MIN_BRIGHTNESS,
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
            update_speed_ms: DEFAULT_UPDATE_SPEED_MS,
            smoothness: DEFAULT_SMOOTHNESS,
        }
    }
}

impl WarmConfig {
    /// Build a config, clamping every field into its documented range
    ///
    /// The temperature snaps to the nearest bucket and a `max_brightness`
    /// below `min_brightness` is raised to it.
    pub const fn new(
        temperature_kelvin: u16,
        change_chance: u8,
        min_brightness: u8,
        max_brightness: u8,
        update_speed_ms: u16,
        smoothness: u8,
    ) -> Self {
        Self {
            color_temperature: ColorTemperature::from_kelvin(temperature_kelvin),
            change_chance: clamp_u8(change_chance, CHANGE_CHANCE_MIN, CHANGE_CHANCE_MAX),
            min_brightness,
            max_brightness: if max_brightness < min_brightness {
                min_brightness
            } else {
                max_brightness
            },
            update_speed_ms: clamp_u16(update_speed_ms, UPDATE_SPEED_MIN_MS, UPDATE_SPEED_MAX_MS),
            smoothness: clamp_u8(smoothness, SMOOTHNESS_MIN, SMOOTHNESS_MAX),
        }
    }

    pub const fn color_temperature(self) -> ColorTemperature {
        self.color_temperature
    }

    /// Probability (percent) that a pixel draws a new target on an update
    pub const fn change_chance(self) -> u8 {
        self.change_chance
    }

    pub const fn min_brightness(self) -> u8 {
        self.min_brightness
    }

    pub const fn max_brightness(self) -> u8 {
        self.max_brightness
    }

    pub const fn update_speed_ms(self) -> u16 {
        self.update_speed_ms
    }

    /// Divisor of the smoothing step
    pub const fn smoothness(self) -> u8 {
        self.smoothness
    }
}

/// Complete user-facing light configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalConfig {
    pub mode: Mode,
    pub static_color: Rgb,
    pub brightness: u8,
    pub warm: WarmConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE,
            static_color: DEFAULT_STATIC_COLOR,
            brightness: DEFAULT_BRIGHTNESS,
            warm: WarmConfig::default(),
        }
    }
}

/// Brightness stepping for rotary input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessStep {
    pub step: u8,
    pub min: u8,
    pub max: u8,
}

impl Default for BrightnessStep {
    fn default() -> Self {
        Self {
            step: 25,
            min: 0,
            max: 150,
        }
    }
}

impl BrightnessStep {
    /// Brightness after one clockwise detent
    pub const fn increase(self, brightness: u8) -> u8 {
        let next = brightness.saturating_add(self.step);
        if next > self.max { self.max } else { next }
    }

    /// Brightness after one counter-clockwise detent
    pub const fn decrease(self, brightness: u8) -> u8 {
        let next = brightness.saturating_sub(self.step);
        if next < self.min { self.min } else { next }
    }
}

/// Startup configuration of the mode controller
#[derive(Debug, Clone, Copy)]
pub struct ControllerConfig {
    /// Segment of the strip the generators draw into. `None` is the full strip.
    pub bounds: Option<RenderingBounds>,
    /// Scale the campfire intensity by the global brightness
    pub campfire_brightness_scaling: bool,
    pub brightness_step: BrightnessStep,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            bounds: None,
            campfire_brightness_scaling: true,
            brightness_step: BrightnessStep::default(),
        }
    }
}

const fn clamp_u8(value: u8, min: u8, max: u8) -> u8 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

const fn clamp_u16(value: u16, min: u16, max: u16) -> u16 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
