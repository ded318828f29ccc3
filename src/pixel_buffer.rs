//! Fixed-size frame buffer shared between generators and the output sink.

use crate::color::{BLACK, Rgb};

/// Error returned when a pixel index is outside of the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Color buffer for a strip of `N` LEDs
///
/// Index `i` maps to the physical LED `i`. Color order and wire format are the
/// output driver's concern.
#[derive(Debug, Clone)]
pub struct PixelBuffer<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PixelBuffer<N> {
    /// Create a buffer with every pixel off
    pub const fn new() -> Self {
        Self { pixels: [BLACK; N] }
    }

    /// Set a single pixel
    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), IndexOutOfRange> {
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(IndexOutOfRange { index, len: N })?;
        *pixel = color;
        Ok(())
    }

    /// Get a single pixel, `None` if the index is outside of the strip
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Number of LEDs in the strip
    #[allow(clippy::unused_self)]
    pub const fn len(&self) -> usize {
        N
    }

    #[allow(clippy::unused_self)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub const fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }
}
