/// Index of the first NaN in `values`, if any.
///
/// # Example
/// ```
/// use finitediff::first_nan;
///
/// assert_eq!(Some(2), first_nan(&[0.0, 1.0, f64::NAN, 3.0]));
/// assert_eq!(None, first_nan(&[0.0, 1.0, 2.0]));
/// ```
pub fn first_nan(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| v.is_nan())
}

/// Index `i >= 1` of the first value with `values[i] <= values[i - 1]`,
/// or `None` when `values` is strictly increasing.
///
/// # Example
/// ```
/// use finitediff::first_monotonicity_violation;
///
/// assert_eq!(Some(2), first_monotonicity_violation(&[0.0, 1.0, 0.5]));
/// assert_eq!(None, first_monotonicity_violation(&[0.0, 1.0, 2.0]));
/// ```
pub fn first_monotonicity_violation(values: &[f64]) -> Option<usize> {
    values
        .windows(2)
        .position(|w| w[1] <= w[0])
        .map(|i| i + 1)
}
