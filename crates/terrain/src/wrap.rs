//! Wraparound addressing into a bounded grid.

/// Map any logical coordinate into `[0, modulus)`, congruent to `a`.
///
/// Negative coordinates wrap from the far edge: `wrap(-1, 5) == 4`.
///
/// `modulus` must be positive. That is the caller's responsibility; a
/// non-positive modulus panics in debug builds and is otherwise unspecified.
#[inline]
pub fn wrap(a: i64, modulus: i64) -> i64 {
    debug_assert!(modulus > 0, "wrap modulus must be positive, got {modulus}");
    a.rem_euclid(modulus)
}

/// [`wrap`] for grid dimensions, returning a ready-to-use index.
#[inline]
pub fn wrap_index(a: i64, len: usize) -> usize {
    wrap(a, len as i64) as usize
}
