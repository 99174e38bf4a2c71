//! Price-series computations, in dependency order.
//!
//! - `align`: forward-fill sparse observations into a dense daily series
//! - `sip`: simulate monthly purchases and build the cash-flow sequence
//! - `xirr`: multi-seed Newton solver for the annualized rate
//! - `rolling`: slide a fixed-length window over the series
//! - `stats`: summary aggregates over rolling results
/// Gap filling into dense daily series.
pub mod align;
/// Rolling-window return generation.
pub mod rolling;
/// Periodic investment simulation.
pub mod sip;
/// Summary aggregates.
pub mod stats;
/// XIRR root finding.
pub mod xirr;
