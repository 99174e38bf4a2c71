//! Rollfolio-specific data transfer objects, configuration primitives and the
//! workspace error type.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod fund;
mod middleware;
mod reports;
mod series;

pub use config::{CacheConfig, CalendarPolicy, RollfolioConfig, RollingConfig};
pub use connector::ConnectorKey;
pub use error::RollfolioError;
pub use fund::{Fund, FundKind};
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use reports::{FundReturns, PeriodReturns, RollingSummary, StatsReport, StatsRequest};
pub use series::{CashFlowEntry, PriceHistory, PriceObservation, RollingResult};
