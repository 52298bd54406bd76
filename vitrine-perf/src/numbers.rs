//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

/// Convert a u32 count to f64 (always exact).
#[must_use]
pub fn u32_to_f64(value: u32) -> f64 {
    f64::from(value)
}

/// Round a f64 and clamp it to the u32 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.clamp(0.0, f64::from(u32::MAX)).round();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert a usize length to f64, saturating on exotic platforms.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}
