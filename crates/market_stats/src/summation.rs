//! Numerically stable accumulation.

/// Neumaier-compensated sum of `values`.
///
/// Tracks the low-order bits lost by each addition so that totals of values
/// spanning many orders of magnitude (trillion-dollar caps next to small
/// ones) stay accurate.
///
/// # Examples
///
/// ```
/// use market_stats::summation::compensated_sum;
///
/// let total = compensated_sum([1e16, 1.0, -1e16]);
/// assert_eq!(total, 1.0);
/// ```
pub fn compensated_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in values {
        let t = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

/// Sum of `values`, clamped to `u64::MAX` instead of overflowing.
pub fn saturating_total<I>(values: I) -> u64
where
    I: IntoIterator<Item = u64>,
{
    let total: u128 = values.into_iter().map(u128::from).sum();
    u64::try_from(total).unwrap_or(u64::MAX)
}
