//! Tolerance-aware rounding for doubles
//!
//! Conversions between Cartesian and spherical form accumulate rounding error
//! in the last few bits. Everything that compares or hashes coordinate
//! components first snaps them onto a grid of [`COMPARE_ACCURACY`] so that such
//! noise does not make two equal points look different.

use crate::constants::COMPARE_ACCURACY;

/// Rounds `value` to the nearest multiple of [`COMPARE_ACCURACY`]
///
/// Ties round to the even multiple. Values so large that `value / COMPARE_ACCURACY`
/// overflows are returned unchanged; their float spacing is already far coarser
/// than the grid.
///
/// # Examples
///
/// ```rust
/// use geolocus::numeric::normalize;
///
/// assert_eq!(normalize(1.0000001), 1.0);
/// assert_eq!(normalize(0.0000004), 0.0);
/// ```
pub fn normalize(value: f64) -> f64 {
    let steps = (value / COMPARE_ACCURACY).round_ties_even();
    if steps.is_finite() {
        steps * COMPARE_ACCURACY
    } else {
        value
    }
}

/// Returns true if both values land on the same grid point
pub fn equal_normalized(a: f64, b: f64) -> bool {
    normalize(a) == normalize(b)
}

/// Bit pattern of the normalized value, usable as a hash or map key
///
/// `-0.0` and `0.0` compare equal, so both map to the bits of `0.0`.
pub fn normalized_key(value: f64) -> u64 {
    let normalized = normalize(value);
    if normalized == 0.0 {
        0.0f64.to_bits()
    } else {
        normalized.to_bits()
    }
}
