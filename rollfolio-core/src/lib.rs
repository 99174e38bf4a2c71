//! rollfolio-core
//!
//! Core types, traits, and computations shared across the rollfolio ecosystem.
//!
//! - `calendar`: dense day/month date grids from the `2000-01-01` epoch, with
//!   memoized day differences.
//! - `timeseries`: price alignment, SIP simulation, rolling returns, XIRR and
//!   summary aggregates.
//! - `connector`: the `FundConnector` trait and its capability traits.
//! - `types`: common data structures re-exported from `rollfolio-types`.
//!
//! Everything under `calendar` and `timeseries` is synchronous and performs no
//! I/O. A rolling computation for one `(fund, period)` pair is self-contained
//! once it holds a `DenseSeries` and a `CalendarIndex`, so independent jobs can
//! run on separate threads sharing one index.
//!
//! ```
//! use rollfolio_core::{CalendarIndex, PriceObservation, RollingConfig, align, rolling_returns_dense};
//! use chrono::NaiveDate;
//!
//! let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
//! let calendar = CalendarIndex::with_today(d("2024-12-31"));
//! let raw = vec![
//!     PriceObservation::new(d("2021-01-01"), 120.0),
//!     PriceObservation::new(d("2020-01-01"), 100.0),
//!     PriceObservation::new(d("2020-06-01"), 110.0),
//! ];
//! let series = align(&calendar, raw).unwrap();
//! let rows = rolling_returns_dense(&calendar, 1, &series, &RollingConfig::default()).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].date, d("2021-01-01"));
//! ```
#![warn(missing_docs)]

/// Date grids and calendar arithmetic.
pub mod calendar;
/// Connector capability traits and the primary `FundConnector` interface.
pub mod connector;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Price-series computations.
pub mod timeseries;
pub mod types;

pub use calendar::{CalendarIndex, EPOCH, add_years, parse_date, sub_years};
pub use connector::{FundConnector, PriceHistoryProvider};
pub use middleware::Middleware;
pub use timeseries::align::{DenseSeries, align, fill_missing_data};
pub use timeseries::rolling::{rolling_returns, rolling_returns_dense};
pub use timeseries::sip::{build_cash_flows, selling_price, units_bought};
pub use timeseries::stats::summarize;
pub use timeseries::xirr::calc_xirr;
pub use types::*;
