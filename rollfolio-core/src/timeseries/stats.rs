//! Summary aggregates over rolling-return series.

use rollfolio_types::{RollingResult, RollingSummary};

/// Smallest value, `None` for empty input.
#[must_use]
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Largest value, `None` for empty input.
#[must_use]
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Arithmetic mean, `None` for empty input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Median; the mean of the two middle values for even lengths.
#[must_use]
pub fn median(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some(f64::midpoint(sorted[mid - 1], sorted[mid]))
    }
}

/// Population standard deviation, `None` for empty input.
#[must_use]
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let avg = average(data)?;
    let squares: Vec<f64> = data.iter().map(|x| (x - avg).powi(2)).collect();
    average(&squares).map(f64::sqrt)
}

/// Aggregate the non-null XIRR values of `rows`.
#[must_use]
pub fn summarize(rows: &[RollingResult]) -> RollingSummary {
    let values: Vec<f64> = rows.iter().filter_map(|r| r.xirr).collect();
    RollingSummary {
        count: values.len(),
        min: min(&values),
        max: max(&values),
        average: average(&values),
        median: median(&values),
        std_dev: std_dev(&values),
    }
}
