use rollfolio_core::{Fund, PeriodReturns, StatsReport, StatsRequest};

use crate::Rollfolio;

impl Rollfolio {
    /// Rolling returns for every `(fund, period)` pair in `requests`, grouped by period.
    ///
    /// - All jobs run concurrently; each window sweep runs on the blocking pool.
    /// - Groups follow the order in which periods first appear in `requests`;
    ///   within a group, funds keep their request order.
    /// - A failing job is reported in `warnings` and left out of its group;
    ///   the remaining jobs still complete. A period whose jobs all fail keeps
    ///   an empty group.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rollfolio::router::stats",
            skip(self, requests),
            fields(requests = requests.len()),
        )
    )]
    pub async fn stats(&self, requests: &[StatsRequest]) -> StatsReport {
        let jobs: Vec<(u32, &Fund)> = requests
            .iter()
            .flat_map(|r| r.funds.iter().map(move |f| (r.period_years, f)))
            .collect();
        let tasks = jobs.iter().map(|&(period, fund)| async move {
            (period, self.rolling_returns(fund, period).await)
        });
        let joined = futures::future::join_all(tasks).await;

        let mut groups: Vec<PeriodReturns> = Vec::new();
        for r in requests {
            if !groups.iter().any(|g| g.period_years == r.period_years) {
                groups.push(PeriodReturns {
                    period_years: r.period_years,
                    list: Vec::new(),
                });
            }
        }

        let mut warnings = Vec::new();
        for (period, result) in joined {
            match result {
                Ok(returns) => {
                    if let Some(group) = groups.iter_mut().find(|g| g.period_years == period) {
                        group.list.push(returns);
                    }
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(period, error = %e, "rolling job failed");
                    warnings.push(e);
                }
            }
        }

        StatsReport { groups, warnings }
    }
}
