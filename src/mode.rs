//! Lighting mode selector

const MODE_NAME_NORMAL: &str = "normal";
const MODE_NAME_CAMPFIRE: &str = "campfire";
const MODE_NAME_CHRISTMAS: &str = "christmas";
const MODE_NAME_WARM_LIGHT: &str = "warm_light";
const MODE_NAME_BEATSIN: &str = "beatsin";

const MODE_ID_NORMAL: u8 = 0;
const MODE_ID_CAMPFIRE: u8 = 1;
const MODE_ID_CHRISTMAS: u8 = 2;
const MODE_ID_WARM_LIGHT: u8 = 3;
const MODE_ID_BEATSIN: u8 = 4;

/// Known lighting modes. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    /// Static color scaled by brightness
    Normal = MODE_ID_NORMAL,
    /// Fire flicker with embers
    Campfire = MODE_ID_CAMPFIRE,
    /// Red/green three phase holiday cycle
    Christmas = MODE_ID_CHRISTMAS,
    /// Smoothed warm white glow
    #[default]
    WarmLight = MODE_ID_WARM_LIGHT,
    /// Single scanning pixel with a fading trail
    Beatsin = MODE_ID_BEATSIN,
}

impl Mode {
    /// All modes in ordinal order
    pub const ALL: [Mode; 5] = [
        Self::Normal,
        Self::Campfire,
        Self::Christmas,
        Self::WarmLight,
        Self::Beatsin,
    ];

    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_NORMAL => Self::Normal,
            MODE_ID_CAMPFIRE => Self::Campfire,
            MODE_ID_CHRISTMAS => Self::Christmas,
            MODE_ID_WARM_LIGHT => Self::WarmLight,
            MODE_ID_BEATSIN => Self::Beatsin,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Next mode in ordinal order, wrapping around
    pub const fn next(self) -> Self {
        match self {
            Self::Normal => Self::Campfire,
            Self::Campfire => Self::Christmas,
            Self::Christmas => Self::WarmLight,
            Self::WarmLight => Self::Beatsin,
            Self::Beatsin => Self::Normal,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => MODE_NAME_NORMAL,
            Self::Campfire => MODE_NAME_CAMPFIRE,
            Self::Christmas => MODE_NAME_CHRISTMAS,
            Self::WarmLight => MODE_NAME_WARM_LIGHT,
            Self::Beatsin => MODE_NAME_BEATSIN,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_NORMAL => Some(Self::Normal),
            MODE_NAME_CAMPFIRE => Some(Self::Campfire),
            MODE_NAME_CHRISTMAS => Some(Self::Christmas),
            MODE_NAME_WARM_LIGHT => Some(Self::WarmLight),
            MODE_NAME_BEATSIN => Some(Self::Beatsin),
            _ => None,
        }
    }

    /// Human readable name for status displays
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Campfire => "Campfire",
            Self::Christmas => "Christmas",
            Self::WarmLight => "Warm light",
            Self::Beatsin => "Beatsin",
        }
    }
}
