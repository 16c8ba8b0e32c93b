/// Converts an `f64` to an `i64` if and only if it holds an exact integer.
///
/// The bitwise operators demand operands with an integer mantissa; any
/// fractional, non-finite, or out-of-range value is rejected with the
/// caller-supplied error.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `error`: The error to return when the value is not an exact integer.
///
/// ## Returns
/// - `Ok(i64)`: The integer value.
/// - `Err(error)`: If the value has no exact integer representation.
///
/// ## Example
/// ```
/// use luna::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(16.0, "not an integer"), Ok(16));
/// assert_eq!(f64_to_i64_exact(16.5, "not an integer"), Err("not an integer"));
/// ```
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn f64_to_i64_exact<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.trunc() != value {
        return Err(error);
    }
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return Err(error);
    }
    Ok(value as i64)
}
