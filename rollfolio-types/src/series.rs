//! Price observations, cash flows and rolling-return rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One known closing price. Serialized as `{"date": "YYYY-MM-DD", "price": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Calendar date of the close.
    pub date: NaiveDate,
    /// Closing price; expected to be strictly positive.
    pub price: f64,
}

impl PriceObservation {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Raw payload returned by a price-history provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Canonical name of the instrument, when the provider knows it.
    pub title: Option<String>,
    /// Observations in provider order; may be unsorted and sparse.
    pub observations: Vec<PriceObservation>,
}

/// A dated cash flow: negative for a purchase, positive for the terminal sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// Date of the flow.
    pub date: NaiveDate,
    /// Signed amount.
    pub value: f64,
}

/// Annualized SIP return for the window ending on `date`, in percent.
///
/// `xirr` is `None` when the solver found no valid root for the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingResult {
    /// Window end-date.
    pub date: NaiveDate,
    /// Rate in percent (`12.34` means 12.34%).
    pub xirr: Option<f64>,
}
