use chrono::NaiveDate;
use rollfolio_core::timeseries::stats::{average, max, median, min, std_dev};
use rollfolio_core::{RollingResult, summarize};

fn row(day: u32, xirr: Option<f64>) -> RollingResult {
    RollingResult {
        date: NaiveDate::from_ymd_opt(2021, 1, day).unwrap(),
        xirr,
    }
}

#[test]
fn aggregates_of_empty_input_are_none() {
    assert_eq!(min(&[]), None);
    assert_eq!(max(&[]), None);
    assert_eq!(average(&[]), None);
    assert_eq!(median(&[]), None);
    assert_eq!(std_dev(&[]), None);
}

#[test]
fn median_handles_both_parities() {
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
}

#[test]
fn std_dev_is_population() {
    let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_eq!(average(&data), Some(5.0));
    assert_eq!(std_dev(&data), Some(2.0));
}

#[test]
fn summary_skips_unsolved_windows() {
    let rows = [
        row(1, Some(12.0)),
        row(2, None),
        row(3, Some(-4.0)),
        row(4, Some(10.0)),
    ];
    let s = summarize(&rows);
    assert_eq!(s.count, 3);
    assert_eq!(s.min, Some(-4.0));
    assert_eq!(s.max, Some(12.0));
    assert_eq!(s.median, Some(10.0));
    assert!((s.average.unwrap() - 6.0).abs() < 1e-12);
}

#[test]
fn summary_of_nothing_is_default() {
    assert_eq!(summarize(&[]), rollfolio_core::RollingSummary::default());
    assert_eq!(summarize(&[row(1, None)]).count, 0);
}
