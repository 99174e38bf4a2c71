use rollfolio_core::{Fund, FundReturns, RollfolioError, rolling_returns_dense, summarize};

use crate::Rollfolio;
use crate::router::prices::prepare;

impl Rollfolio {
    /// Rolling SIP returns of `fund` over windows of `period_years`.
    ///
    /// The fetch runs on the caller's task; alignment and the window sweep run
    /// on the blocking pool against a snapshot of the current calendar.
    ///
    /// # Errors
    /// - `InvalidArg` for a zero period.
    /// - Any error from [`price_series`](Self::price_series).
    /// - `MissingPrice` if the aligned series has a gap on a purchase date.
    /// - `Other` if the worker task panics or is cancelled.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rollfolio::router::rolling_returns",
            skip(self, fund),
            fields(fund = %fund),
        )
    )]
    pub async fn rolling_returns(
        &self,
        fund: &Fund,
        period_years: u32,
    ) -> Result<FundReturns, RollfolioError> {
        if period_years == 0 {
            return Err(RollfolioError::InvalidArg(
                "period must be at least one year".into(),
            ));
        }
        let calendar = self.calendar();
        let history = self.fetch_price_history(fund).await?;
        let cfg = self.cfg.rolling;
        let label = fund.to_string();
        let fund = fund.clone();

        tokio::task::spawn_blocking(move || -> Result<FundReturns, RollfolioError> {
            let (fund, series) = prepare(&calendar, &fund, history)?;
            let data = rolling_returns_dense(&calendar, period_years, &series, &cfg)?;
            let summary = summarize(&data);
            Ok(FundReturns {
                fund,
                period_years,
                data,
                summary,
            })
        })
        .await
        .map_err(|e| RollfolioError::Other(format!("rolling worker for {label} failed: {e}")))?
    }
}
