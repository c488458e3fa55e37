//! Shared inference utilities.

/// Rounds `value` to `decimals` places, halves away from zero.
#[inline]
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
