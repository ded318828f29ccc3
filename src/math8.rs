/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linear brightness multiplier: `value * brightness / 255`
///
/// Unlike [`scale8`] this is exact at both ends and in the middle of the
/// range, which is what the brightness-scaled generators rely on.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale_linear(value: u8, brightness: u8) -> u8 {
    (value as u16 * brightness as u16 / 255) as u8
}

/// Fade a value towards black: `value * (255 - amount) / 256`
#[inline]
pub const fn fade8(value: u8, amount: u8) -> u8 {
    scale8(value, 255 - amount)
}

/// Move `current` one step towards `target`, closing `1/divisor` of the gap
///
/// Integer division truncates toward zero, so the value stops moving once
/// the gap is smaller than `divisor`. A zero divisor is treated as one.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn approach8(current: u8, target: u8, divisor: u8) -> u8 {
    let divisor = if divisor == 0 { 1 } else { divisor as i16 };
    let diff = target as i16 - current as i16;
    (current as i16 + diff / divisor) as u8
}

/// Blend `value` with the average of two neighbours
///
/// The result is `(value * self_weight + avg(left, right)) / (self_weight + 1)`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn diffuse8(value: u8, left: u8, right: u8, self_weight: u8) -> u8 {
    let neighbour_avg = (left as u16 + right as u16) / 2;
    ((value as u16 * self_weight as u16 + neighbour_avg) / (self_weight as u16 + 1)) as u8
}
