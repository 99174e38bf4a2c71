//! Gap filling of sparse price histories into dense daily series.

use std::collections::BTreeMap;
use std::collections::btree_map;

use chrono::{Datelike, NaiveDate};
use rollfolio_types::{PriceObservation, RollfolioError};

use crate::calendar::CalendarIndex;

/// Ordered date → price mapping with random access by date.
///
/// Built once per fetched instrument and treated as immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseSeries {
    prices: BTreeMap<NaiveDate, f64>,
}

impl DenseSeries {
    /// Price on `date`, if the series covers it.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.prices.get(&date).copied()
    }

    /// Number of dated prices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the series holds no prices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Earliest covered date.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next().copied()
    }

    /// Latest covered date.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices.keys().next_back().copied()
    }

    /// Iterate `(date, price)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.prices.iter().map(|(d, p)| (*d, *p))
    }

    /// Copy the series back out as observations, in date order.
    #[must_use]
    pub fn to_observations(&self) -> Vec<PriceObservation> {
        self.iter()
            .map(|(date, price)| PriceObservation::new(date, price))
            .collect()
    }
}

/// Later observations for the same date replace earlier ones.
impl FromIterator<PriceObservation> for DenseSeries {
    fn from_iter<I: IntoIterator<Item = PriceObservation>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|o| (o.date, o.price)).collect(),
        }
    }
}

impl IntoIterator for DenseSeries {
    type Item = (NaiveDate, f64);
    type IntoIter = btree_map::IntoIter<NaiveDate, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.prices.into_iter()
    }
}

/// Fill every calendar day between the first observation's month start and the
/// last observation with the most recent known price.
///
/// - Input order does not matter; observations are stable-sorted by date.
/// - Days before the first observation (within its month) take its price.
/// - For duplicate dates the first observation in sorted order wins.
/// - Empty input yields an empty output.
///
/// # Errors
/// Returns `DateOutOfRange` if any observation lies outside the calendar.
pub fn fill_missing_data(
    calendar: &CalendarIndex,
    mut data: Vec<PriceObservation>,
) -> Result<Vec<PriceObservation>, RollfolioError> {
    data.sort_by_key(|o| o.date);
    let (Some(first), Some(last)) = (data.first().copied(), data.last().copied()) else {
        return Ok(Vec::new());
    };

    let month_start = first.date.with_day(1).unwrap_or(first.date);
    let start = calendar.day_index(month_start)?;
    let end = calendar.day_index(last.date)?;
    let days = calendar
        .day_grid()
        .get(start..=end)
        .ok_or_else(|| RollfolioError::date_out_of_range(last.date, month_start, calendar.today()))?;

    let mut out = Vec::with_capacity(days.len());
    let mut next = 0usize;
    let mut price = first.price;
    for &date in days {
        if data.get(next).is_some_and(|o| o.date == date) {
            price = data[next].price;
            while data.get(next).is_some_and(|o| o.date == date) {
                next += 1;
            }
        }
        out.push(PriceObservation::new(date, price));
    }
    Ok(out)
}

/// [`fill_missing_data`] collected into a [`DenseSeries`].
///
/// # Errors
/// Returns `DateOutOfRange` if any observation lies outside the calendar.
pub fn align(
    calendar: &CalendarIndex,
    data: Vec<PriceObservation>,
) -> Result<DenseSeries, RollfolioError> {
    Ok(fill_missing_data(calendar, data)?.into_iter().collect())
}
