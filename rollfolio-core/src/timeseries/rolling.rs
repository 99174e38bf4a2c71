//! Rolling-window SIP returns.
//!
//! For every end-date `d` reachable by a full window, simulate monthly purchases
//! over `[d - period, d]`, sell on `d`, and record the XIRR of those flows.

use chrono::NaiveDate;
use rollfolio_types::{PriceObservation, RollfolioError, RollingConfig, RollingResult};

use crate::calendar::{CalendarIndex, add_years, sub_years};
use crate::timeseries::align::DenseSeries;
use crate::timeseries::sip::{build_cash_flows, selling_price};
use crate::timeseries::xirr::calc_xirr;

fn validate(period_years: u32, cfg: &RollingConfig) -> Result<(), RollfolioError> {
    if period_years == 0 {
        return Err(RollfolioError::InvalidArg(
            "period must be at least one year".into(),
        ));
    }
    if !(cfg.contribution_amount.is_finite() && cfg.contribution_amount > 0.0) {
        return Err(RollfolioError::InvalidArg(format!(
            "contribution amount must be positive, got {}",
            cfg.contribution_amount
        )));
    }
    Ok(())
}

/// Rolling returns over observations that already cover every needed day.
///
/// The observations are indexed as-is; run them through
/// [`align`](crate::timeseries::align::align) first if they are sparse.
/// Empty input yields an empty output.
///
/// # Errors
/// - `InvalidArg` for a zero period or a non-positive contribution.
/// - `DateOutOfRange` if the observations leave the calendar.
/// - `MissingPrice` if a purchase date is absent from the observations.
pub fn rolling_returns(
    calendar: &CalendarIndex,
    period_years: u32,
    observations: &[PriceObservation],
    cfg: &RollingConfig,
) -> Result<Vec<RollingResult>, RollfolioError> {
    let Some(head) = observations.first() else {
        return Ok(Vec::new());
    };
    let (mut min, mut max) = (head.date, head.date);
    for o in observations {
        min = min.min(o.date);
        max = max.max(o.date);
    }
    let series: DenseSeries = observations.iter().copied().collect();
    windows(calendar, period_years, &series, (min, max), cfg)
}

/// [`rolling_returns`] over a prebuilt series.
///
/// # Errors
/// Same as [`rolling_returns`].
pub fn rolling_returns_dense(
    calendar: &CalendarIndex,
    period_years: u32,
    series: &DenseSeries,
    cfg: &RollingConfig,
) -> Result<Vec<RollingResult>, RollfolioError> {
    let (Some(min), Some(max)) = (series.first_date(), series.last_date()) else {
        return Ok(Vec::new());
    };
    windows(calendar, period_years, series, (min, max), cfg)
}

fn windows(
    calendar: &CalendarIndex,
    period_years: u32,
    series: &DenseSeries,
    (min, max): (NaiveDate, NaiveDate),
    cfg: &RollingConfig,
) -> Result<Vec<RollingResult>, RollfolioError> {
    validate(period_years, cfg)?;

    let start = add_years(min, period_years)?;
    if start > max {
        return Ok(Vec::new());
    }
    let first = calendar.day_index(start)?;
    let last = calendar.day_index(max)?;
    let end_dates = calendar
        .day_grid()
        .get(first..=last)
        .ok_or_else(|| RollfolioError::date_out_of_range(max, start, calendar.today()))?;

    let amount = cfg.contribution_amount;
    let mut out = Vec::with_capacity(end_dates.len());
    for &date in end_dates {
        let period_start = sub_years(date, period_years)?;
        let Some(sale) = selling_price(calendar, series, period_start, date, amount)? else {
            #[cfg(feature = "tracing")]
            tracing::debug!(%date, "no selling price; window skipped");
            continue;
        };
        let flows = build_cash_flows(calendar, period_start, date, amount, sale)?;
        let xirr = calc_xirr(calendar, &flows, cfg.initial_guess);
        out.push(RollingResult {
            date,
            xirr: xirr.map(|rate| rate * 100.0),
        });
    }
    Ok(out)
}
