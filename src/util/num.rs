/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use fnplot::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(1000, "too big!"), Ok(1000.0));
/// assert!(usize_to_f64_checked(usize::MAX, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked<E>(value: usize, error: E) -> Result<f64, E> {
    match u64::try_from(value) {
        Ok(v) if v <= MAX_SAFE_U64_INT => Ok(value as f64),
        _ => Err(error),
    }
}

/// Converts a canvas coordinate to the `f32` precision SVG paths use.
///
/// Values beyond the `f32` range are clamped so an extreme sample can never
/// produce an infinite coordinate in the document.
///
/// ## Example
/// ```
/// use fnplot::util::num::to_canvas;
///
/// assert_eq!(to_canvas(12.5), 12.5_f32);
/// assert_eq!(to_canvas(1e300), f32::MAX);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn to_canvas(value: f64) -> f32 {
    value.clamp(f64::from(f32::MIN), f64::from(f32::MAX)) as f32
}
