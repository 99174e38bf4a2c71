//! Re-export of the foundational types from `rollfolio-types`.
// Consolidated re-exports so downstream crates can depend on `rollfolio-core` only

pub use rollfolio_types::{
    CacheConfig, CalendarPolicy, CashFlowEntry, ConnectorKey, Fund, FundKind, FundReturns,
    MiddlewareLayer, MiddlewareStack, PeriodReturns, PriceHistory, PriceObservation,
    RollfolioConfig, RollfolioError, RollingConfig, RollingResult, RollingSummary, StatsReport,
    StatsRequest,
};
