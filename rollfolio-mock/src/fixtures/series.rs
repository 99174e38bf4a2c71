use chrono::{Datelike, Months, NaiveDate};
use rollfolio_core::{PriceHistory, PriceObservation};

pub const FIRST_YEAR: i32 = 2015;
pub const LAST_YEAR: i32 = 2020;

pub fn by_code(code: &str) -> Option<PriceHistory> {
    match code {
        "FLAT" => build("Mock Flat Fund", weekdays()?, |_| 100.0),
        "GROWTH" => build("Mock Growth Fund", weekdays()?, growth),
        "SPARSE" => build("Mock Sparse Fund", month_starts()?, |d| {
            let months = (d.year() - FIRST_YEAR) * 12 + d.month0() as i32;
            50.0 + f64::from(months) * 0.5
        }),
        "EMPTY" => Some(PriceHistory {
            title: Some("Mock Empty Fund".into()),
            observations: Vec::new(),
        }),
        _ => None,
    }
}

// 12% a year, compounded daily from the first fixture date.
fn growth(date: NaiveDate) -> f64 {
    let origin = NaiveDate::from_ymd_opt(FIRST_YEAR, 1, 1).unwrap_or(date);
    #[allow(clippy::cast_precision_loss)]
    let years = (date - origin).num_days() as f64 / 365.0;
    10.0 * 1.12f64.powf(years)
}

fn bounds() -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(FIRST_YEAR, 1, 1)?,
        NaiveDate::from_ymd_opt(LAST_YEAR, 12, 31)?,
    ))
}

fn weekdays() -> Option<Vec<NaiveDate>> {
    let (from, to) = bounds()?;
    Some(
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| d.weekday().number_from_monday() <= 5)
            .collect(),
    )
}

fn month_starts() -> Option<Vec<NaiveDate>> {
    let (from, to) = bounds()?;
    Some(
        (0u32..)
            .map_while(|k| from.checked_add_months(Months::new(k)))
            .take_while(|d| *d <= to)
            .collect(),
    )
}

// Feeds list the newest observation first.
fn build(title: &str, dates: Vec<NaiveDate>, price: impl Fn(NaiveDate) -> f64) -> Option<PriceHistory> {
    let observations = dates
        .into_iter()
        .rev()
        .map(|d| PriceObservation::new(d, price(d)))
        .collect();
    Some(PriceHistory {
        title: Some(title.to_string()),
        observations,
    })
}
