use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rollfolio_core::timeseries::xirr::{DEFAULT_GUESS, seeds};
use rollfolio_core::{CalendarIndex, CashFlowEntry, calc_xirr, parse_date};

fn d(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn flow(date: NaiveDate, value: f64) -> CashFlowEntry {
    CashFlowEntry { date, value }
}

fn calendar() -> CalendarIndex {
    CalendarIndex::with_today(d("2024-12-31"))
}

#[test]
fn single_year_ten_percent() {
    let cal = calendar();
    let flows = [
        flow(d("2021-01-01"), -1000.0),
        flow(d("2022-01-01"), 1100.0),
    ];
    let rate = calc_xirr(&cal, &flows, DEFAULT_GUESS).unwrap();
    assert!((rate - 0.10).abs() < 1e-6, "rate = {rate}");
}

#[test]
fn break_even_is_zero() {
    let cal = calendar();
    let flows = [
        flow(d("2021-01-01"), -500.0),
        flow(d("2021-07-01"), -500.0),
        flow(d("2022-01-01"), 1000.0),
    ];
    let rate = calc_xirr(&cal, &flows, DEFAULT_GUESS).unwrap();
    assert!(rate.abs() < 1e-6, "rate = {rate}");
}

#[test]
fn monthly_plan_with_gain_is_positive() {
    let cal = calendar();
    let mut flows: Vec<CashFlowEntry> = (0..12)
        .map(|m| flow(cal.month_at(240 + m).unwrap(), -1000.0))
        .collect();
    flows.push(flow(d("2020-12-15"), 13_200.0));
    let rate = calc_xirr(&cal, &flows, DEFAULT_GUESS).unwrap();
    assert!(rate > 0.0 && rate < 1.0, "rate = {rate}");
}

#[test]
fn same_sign_flows_have_no_rate() {
    let cal = calendar();
    let outflows = [
        flow(d("2021-01-01"), -1000.0),
        flow(d("2022-01-01"), -1100.0),
    ];
    assert_eq!(calc_xirr(&cal, &outflows, DEFAULT_GUESS), None);
    let inflows = [flow(d("2021-01-01"), 1000.0), flow(d("2022-01-01"), 1.0)];
    assert_eq!(calc_xirr(&cal, &inflows, DEFAULT_GUESS), None);
    assert_eq!(calc_xirr(&cal, &[], DEFAULT_GUESS), None);
    assert_eq!(
        calc_xirr(&cal, &[flow(d("2021-01-01"), -1.0)], DEFAULT_GUESS),
        None
    );
}

#[test]
fn seeds_start_with_the_guess() {
    let all: Vec<f64> = seeds(0.25).collect();
    assert_eq!(all.len(), 201);
    assert!((all[0] - 0.25).abs() < f64::EPSILON);
    assert!((all[1] + 1.0).abs() < f64::EPSILON);
    assert!((all[200] - 0.99).abs() < 1e-12);
}

#[test]
fn fallback_seeds_rescue_a_bad_guess() {
    let cal = calendar();
    let flows = [
        flow(d("2021-01-01"), -1000.0),
        flow(d("2022-01-01"), 1100.0),
    ];
    let rate = calc_xirr(&cal, &flows, f64::NAN).unwrap();
    assert!((rate - 0.10).abs() < 1e-6, "rate = {rate}");
}

proptest! {
    #[test]
    fn recovers_compounded_rate(rate in -0.1f64..0.8, years in 1u64..6) {
        let cal = calendar();
        let start = d("2005-01-01");
        let end = start + Days::new(365 * years);
        #[allow(clippy::cast_precision_loss)]
        let payoff = 1000.0 * (1.0 + rate).powf(years as f64);
        let flows = [flow(start, -1000.0), flow(end, payoff)];
        let found = calc_xirr(&cal, &flows, DEFAULT_GUESS).unwrap();
        prop_assert!((found - rate).abs() < 1e-6, "found {} for {}", found, rate);
    }
}
