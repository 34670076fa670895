//! Division helpers shared by every percentage and average in the engine
//!
//! A zero (or non-finite) denominator yields 0 instead of NaN/Infinity, so
//! derived metrics such as budget utilization, savings rate, goal progress
//! and category averages degrade to 0 on empty input.

/// Amounts closer to zero than half a minor currency unit count as zero
pub const MONEY_EPSILON: f64 = 0.005;

/// `numerator / denominator`, or 0 when the result would not be finite
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    numerator / denominator
}

/// `part / whole * 100`, or 0 when `whole` is 0
pub fn percent_of(part: f64, whole: f64) -> f64 {
    safe_ratio(part, whole) * 100.0
}

/// Sum of `values`, `+0.0` when empty
///
/// `Iterator::sum` for floats starts from `-0.0`, which would render as
/// "-0.00" for an empty category or month.
pub fn total<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().fold(0.0, |acc, x| acc + x)
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    safe_ratio(total(values.iter().copied()), values.len() as f64)
}

/// Percent change of `value` relative to `|base|`
///
/// `None` when `base` is within [`MONEY_EPSILON`] of zero.
pub fn relative_change(value: f64, base: f64) -> Option<f64> {
    if !base.is_finite() || base.abs() < MONEY_EPSILON {
        return None;
    }
    Some(percent_of(value - base, base.abs()))
}
