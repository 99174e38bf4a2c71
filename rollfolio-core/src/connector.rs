use async_trait::async_trait;

use crate::RollfolioError;
pub use rollfolio_types::ConnectorKey;
use rollfolio_types::{Fund, FundKind, PriceHistory};

/// Focused role trait for connectors that provide price histories.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Fetch the full known price history of `fund`.
    ///
    /// Observations may be unsorted and sparse; the orchestrator aligns them.
    async fn price_history(&self, fund: &Fund) -> Result<PriceHistory, RollfolioError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait FundConnector: Send + Sync {
    /// A stable identifier (e.g., "rollfolio-mfapi", "rollfolio-mock").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector *claims* to support a given fund kind.
    ///
    /// Default: returns `false` for all kinds. Connectors must explicitly override
    /// this method to declare which kinds they support.
    fn supports_kind(&self, kind: FundKind) -> bool {
        let _ = kind;
        false
    }

    /// Advertise price-history capability by returning a usable trait object reference when supported.
    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        None
    }
}
