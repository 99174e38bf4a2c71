//! Request and report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::error::RollfolioError;
use crate::fund::Fund;
use crate::series::RollingResult;

/// One period and the funds to evaluate over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRequest {
    /// Window length in whole years.
    #[serde(rename = "period")]
    pub period_years: u32,
    /// Funds to evaluate.
    #[serde(rename = "list")]
    pub funds: Vec<Fund>,
}

impl StatsRequest {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(period_years: u32, funds: Vec<Fund>) -> Self {
        Self {
            period_years,
            funds,
        }
    }
}

/// Distribution of the non-null XIRR values of a rolling series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RollingSummary {
    /// Number of non-null values summarized.
    pub count: usize,
    /// Smallest value.
    pub min: Option<f64>,
    /// Largest value.
    pub max: Option<f64>,
    /// Arithmetic mean.
    pub average: Option<f64>,
    /// Median (mean of the two middle values for even counts).
    pub median: Option<f64>,
    /// Population standard deviation.
    pub std_dev: Option<f64>,
}

/// Rolling returns of one fund over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundReturns {
    /// The fund, carrying the provider's title when one was supplied.
    pub fund: Fund,
    /// Window length in whole years.
    #[serde(rename = "period")]
    pub period_years: u32,
    /// Date-ordered rolling returns.
    pub data: Vec<RollingResult>,
    /// Summary of `data`.
    pub summary: RollingSummary,
}

/// All fund results sharing a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReturns {
    /// Window length in whole years.
    #[serde(rename = "period")]
    pub period_years: u32,
    /// Results in request order.
    pub list: Vec<FundReturns>,
}

/// Outcome of a multi-fund, multi-period stats request.
///
/// Jobs that failed are absent from `groups` and reported in `warnings`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsReport {
    /// Successful results grouped by period, in first-seen period order.
    pub groups: Vec<PeriodReturns>,
    /// Per-job failures.
    pub warnings: Vec<RollfolioError>,
}

impl StatsReport {
    /// Look up the group for a period.
    #[must_use]
    pub fn period(&self, period_years: u32) -> Option<&PeriodReturns> {
        self.groups.iter().find(|g| g.period_years == period_years)
    }
}
