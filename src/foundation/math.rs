/// Map any (possibly negative) index into `0..len`.
///
/// `len` must be non-zero; callers validate content lengths at construction.
pub(crate) fn wrap_index(index: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    index.rem_euclid(len as i64) as usize
}

#[inline]
pub(crate) fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[inline]
pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
