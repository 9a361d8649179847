/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```should_panic
/// # use cliffwalk::assert_interval;
/// let alpha = 2.0;
/// assert_interval!(alpha, 0.0, 1.0);
/// ```
/// This panics with the message "Invalid value for \`alpha\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Indices of every element equal to the maximum of `values`
///
/// Comparisons use `f32::total_cmp`, so a `NaN` never counts as a maximum unless
/// every element is `NaN`.
pub(crate) fn argmax_all(values: &[f32]) -> Vec<usize> {
    let Some(max) = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .max_by(f32::total_cmp)
    else {
        return (0..values.len()).collect();
    };

    values
        .iter()
        .enumerate()
        .filter_map(|(i, &v)| (v == max).then_some(i))
        .collect()
}
