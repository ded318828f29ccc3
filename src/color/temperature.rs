use super::{Rgb, rgb_from_u32};

const BUCKET_MIN_KELVIN: u16 = 2000;
const BUCKET_MAX_KELVIN: u16 = 6000;
const BUCKET_STEP_KELVIN: u16 = 1000;

// Base white point per bucket, full intensity.
#[allow(clippy::unreadable_literal)]
const BASE_2000K: Rgb = rgb_from_u32(0xFF9329);
#[allow(clippy::unreadable_literal)]
const BASE_3000K: Rgb = rgb_from_u32(0xFFB46B);
#[allow(clippy::unreadable_literal)]
const BASE_4000K: Rgb = rgb_from_u32(0xFFD1A3);
#[allow(clippy::unreadable_literal)]
const BASE_5000K: Rgb = rgb_from_u32(0xFFE4CE);
#[allow(clippy::unreadable_literal)]
const BASE_6000K: Rgb = rgb_from_u32(0xFFF3EF);

/// Discrete color temperature supported by the warm light generator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorTemperature {
    K2000,
    #[default]
    K3000,
    K4000,
    K5000,
    K6000,
}

impl ColorTemperature {
    /// Snap an arbitrary Kelvin value to the nearest supported bucket
    ///
    /// Values outside 2000..=6000 are clamped first.
    pub const fn from_kelvin(kelvin: u16) -> Self {
        let kelvin = if kelvin < BUCKET_MIN_KELVIN {
            BUCKET_MIN_KELVIN
        } else if kelvin > BUCKET_MAX_KELVIN {
            BUCKET_MAX_KELVIN
        } else {
            kelvin
        };
        let offset = kelvin - BUCKET_MIN_KELVIN + BUCKET_STEP_KELVIN / 2;
        match offset / BUCKET_STEP_KELVIN {
            0 => Self::K2000,
            1 => Self::K3000,
            2 => Self::K4000,
            3 => Self::K5000,
            _ => Self::K6000,
        }
    }

    /// Decode the persisted form (Kelvin / 100)
    pub const fn from_hundreds(value: u8) -> Self {
        Self::from_kelvin(value as u16 * 100)
    }

    /// Encode to the persisted form (Kelvin / 100)
    #[allow(clippy::cast_possible_truncation)]
    pub const fn as_hundreds(self) -> u8 {
        (self.kelvin() / 100) as u8
    }

    pub const fn kelvin(self) -> u16 {
        match self {
            Self::K2000 => 2000,
            Self::K3000 => 3000,
            Self::K4000 => 4000,
            Self::K5000 => 5000,
            Self::K6000 => 6000,
        }
    }

    /// Full-intensity base color of this bucket
    pub const fn base_color(self) -> Rgb {
        match self {
            Self::K2000 => BASE_2000K,
            Self::K3000 => BASE_3000K,
            Self::K4000 => BASE_4000K,
            Self::K5000 => BASE_5000K,
            Self::K6000 => BASE_6000K,
        }
    }
}
