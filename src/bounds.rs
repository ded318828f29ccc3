use crate::Rgb;

/// Bounds of the rendering area
///
/// Pixels outside of `start..end` are never touched by a generator and stay
/// dark, which allows masking LEDs hidden behind a housing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingBounds {
    pub start: usize,
    pub end: usize,
}

impl RenderingBounds {
    /// Bounds covering the whole strip
    pub const fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// Get the number of LEDs in the rendering area
    pub const fn count(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Clamp the bounds to a strip of `len` pixels
    pub const fn clamped(self, len: usize) -> Self {
        let end = if self.end > len { len } else { self.end };
        let start = if self.start > end { end } else { self.start };
        Self { start, end }
    }
}

/// Get a slice of the LEDs within the bounds
pub(crate) fn bounded(leds: &mut [Rgb], bounds: RenderingBounds) -> &mut [Rgb] {
    let bounds = bounds.clamped(leds.len());
    &mut leds[bounds.start..bounds.end]
}
