use rollfolio_core::{
    CalendarIndex, DenseSeries, Fund, PriceHistory, PriceObservation, RollfolioError, align,
};

use crate::Rollfolio;

/// Turn a raw provider history into an aligned series for `fund`.
///
/// Observations outside the calendar or with a non-positive price are dropped
/// before alignment. A fund whose title is still its code adopts the
/// provider's title.
pub(crate) fn prepare(
    calendar: &CalendarIndex,
    fund: &Fund,
    history: PriceHistory,
) -> Result<(Fund, DenseSeries), RollfolioError> {
    let fund = match history.title {
        Some(title) if fund.title == fund.code && !title.is_empty() => {
            fund.clone().with_title(title)
        }
        _ => fund.clone(),
    };

    #[cfg(feature = "tracing")]
    let total = history.observations.len();
    let usable: Vec<PriceObservation> = history
        .observations
        .into_iter()
        .filter(|o| calendar.is_date_within_range(o.date) && o.price.is_finite() && o.price > 0.0)
        .collect();
    #[cfg(feature = "tracing")]
    {
        if usable.len() < total {
            tracing::debug!(fund = %fund, dropped = total - usable.len(), "discarded unusable observations");
        }
    }

    let series = align(calendar, usable)?;
    Ok((fund, series))
}

impl Rollfolio {
    /// Fetch the price history of `fund` and align it into a dense daily series.
    ///
    /// Returns the fund with its canonical title alongside the series.
    ///
    /// # Errors
    /// - `Unsupported` if no registered connector handles the fund's kind.
    /// - `NotFound` if every eligible provider reports the fund as unknown.
    /// - `AllProvidersFailed` for any other mix of provider failures.
    pub async fn price_series(&self, fund: &Fund) -> Result<(Fund, DenseSeries), RollfolioError> {
        let calendar = self.calendar();
        let history = self.fetch_price_history(fund).await?;
        prepare(&calendar, fund, history)
    }
}
