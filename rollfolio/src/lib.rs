//! Rollfolio computes rolling SIP returns for mutual funds and indices.
//!
//! Overview
//! - Routes price-history requests to connectors implementing the
//!   `rollfolio_core` contracts, in registration order with per-provider
//!   timeouts and fallback.
//! - Aligns sparse provider histories into dense daily series.
//! - For each end date, simulates a fixed monthly investment over the trailing
//!   window, sells on the end date and reports the annualized XIRR in percent.
//! - Fans out many `(fund, period)` jobs at once and groups the results by period.
//!
//! Key behaviors and trade-offs
//! - All dates live on a calendar covering `[2000-01-01, today]`. With
//!   `CalendarPolicy::Pinned`, "today" is fixed for the orchestrator's
//!   lifetime; `RefreshDaily` rebuilds the calendar after the date rolls over.
//! - Windows without a price on their end date are skipped; windows whose flows
//!   have no solvable rate are kept with `xirr: None`.
//! - Caching is opt-in via [`RollfolioBuilder::cache`]; concurrent requests for
//!   one fund then share a single upstream fetch.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use rollfolio::{Fund, Rollfolio, StatsRequest};
//! use rollfolio_mock::MockConnector;
//!
//! let rf = Rollfolio::builder()
//!     .with_connector(Arc::new(MockConnector::new()))
//!     .build()?;
//!
//! let one = rf.rolling_returns(&Fund::mutual_fund("GROWTH"), 3).await?;
//! println!("{} windows, median {:?}", one.summary.count, one.summary.median);
//!
//! let report = rf
//!     .stats(&[StatsRequest::new(1, vec![Fund::mutual_fund("FLAT"), Fund::index("GROWTH")])])
//!     .await;
//! ```
//!
//! See `rollfolio/examples/` for a runnable demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Rollfolio, RollfolioBuilder};
pub use router::util::collapse_errors;

pub use rollfolio_middleware::{CacheMiddleware, CachingConnector, ConnectorBuilder};

// Re-export core types for convenience
pub use rollfolio_core::{
    CacheConfig, CalendarIndex, CalendarPolicy, CashFlowEntry, DenseSeries, Fund, FundConnector,
    FundKind, FundReturns, PeriodReturns, PriceHistory, PriceHistoryProvider, PriceObservation,
    RollfolioConfig, RollfolioError, RollingConfig, RollingResult, RollingSummary, StatsReport,
    StatsRequest,
};
