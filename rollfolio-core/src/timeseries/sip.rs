//! Monthly fixed-amount purchase simulation and the resulting cash flows.

use chrono::NaiveDate;
use rollfolio_types::{CashFlowEntry, RollfolioError};

use crate::calendar::CalendarIndex;
use crate::timeseries::align::DenseSeries;

fn purchase_dates(
    calendar: &CalendarIndex,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<&[NaiveDate], RollfolioError> {
    let start = calendar.month_index(period_start)?;
    let end = calendar.month_index(period_end)?;
    if start > end {
        return Ok(&[]);
    }
    calendar
        .month_grid()
        .get(start..=end)
        .ok_or_else(|| RollfolioError::date_out_of_range(period_end, period_start, calendar.today()))
}

/// Units accumulated by investing `amount` on every month-grid date from
/// `period_start`'s month to `period_end`'s month inclusive.
///
/// # Errors
/// - `MissingPrice` if a purchase date has no price in `series`.
/// - `DateOutOfRange` if either bound is outside the calendar.
pub fn units_bought(
    calendar: &CalendarIndex,
    series: &DenseSeries,
    period_start: NaiveDate,
    period_end: NaiveDate,
    amount: f64,
) -> Result<f64, RollfolioError> {
    let mut units = 0.0;
    for &date in purchase_dates(calendar, period_start, period_end)? {
        let price = series
            .get(date)
            .ok_or_else(|| RollfolioError::missing_price(date))?;
        units += amount / price;
    }
    Ok(units)
}

/// Value of the accumulated units at `period_end`'s price.
///
/// Returns `Ok(None)` when the series has no price on `period_end`.
///
/// # Errors
/// - `MissingPrice` if a purchase date has no price in `series`.
/// - `DateOutOfRange` if either bound is outside the calendar.
pub fn selling_price(
    calendar: &CalendarIndex,
    series: &DenseSeries,
    period_start: NaiveDate,
    period_end: NaiveDate,
    amount: f64,
) -> Result<Option<f64>, RollfolioError> {
    let units = units_bought(calendar, series, period_start, period_end, amount)?;
    Ok(series.get(period_end).map(|price| units * price))
}

/// One `-amount` outflow per purchase date, then the `selling_price` inflow on
/// `period_end`.
///
/// # Errors
/// Returns `DateOutOfRange` if either bound is outside the calendar.
pub fn build_cash_flows(
    calendar: &CalendarIndex,
    period_start: NaiveDate,
    period_end: NaiveDate,
    amount: f64,
    selling_price: f64,
) -> Result<Vec<CashFlowEntry>, RollfolioError> {
    let dates = purchase_dates(calendar, period_start, period_end)?;
    let mut flows = Vec::with_capacity(dates.len() + 1);
    flows.extend(dates.iter().map(|&date| CashFlowEntry {
        date,
        value: -amount,
    }));
    flows.push(CashFlowEntry {
        date: period_end,
        value: selling_price,
    });
    Ok(flows)
}
