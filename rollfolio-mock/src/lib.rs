//! Deterministic mock connectors for tests and examples.
//!
//! [`MockConnector`] serves fixture price histories keyed by fund code:
//!
//! | code     | series                                              |
//! |----------|-----------------------------------------------------|
//! | `FLAT`   | weekdays 2015–2020 at a constant 100                |
//! | `GROWTH` | weekdays 2015–2020 compounding at 12% a year        |
//! | `SPARSE` | first of each month 2015–2020, slowly rising        |
//! | `EMPTY`  | a title and no observations                         |
//! | `FAIL`   | forced provider error                               |
//! | `TIMEOUT`| the `FLAT` series after a 200 ms delay              |
//!
//! Any other code yields `NotFound`. [`DynamicMockConnector`] lets tests
//! script per-code behavior at runtime.
use async_trait::async_trait;
use rollfolio_core::connector::PriceHistoryProvider;
use rollfolio_core::{Fund, FundConnector, FundKind, PriceHistory, RollfolioError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector for CI-safe examples. Provides deterministic data from generated fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Stable connector name.
    pub const NAME: &'static str = "rollfolio-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(code: &str) -> Result<(), RollfolioError> {
        match code {
            "FAIL" => Err(RollfolioError::provider(
                Self::NAME,
                "forced failure: price-history",
            )),
            "TIMEOUT" => {
                // Orchestrator may time out depending on config
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl FundConnector for MockConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_kind(&self, _kind: FundKind) -> bool {
        true
    }

    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        Some(self as &dyn PriceHistoryProvider)
    }
}

#[async_trait]
impl PriceHistoryProvider for MockConnector {
    async fn price_history(&self, fund: &Fund) -> Result<PriceHistory, RollfolioError> {
        let code = fund.code.as_str();
        Self::maybe_fail_or_timeout(code).await?;
        let lookup = if code == "TIMEOUT" { "FLAT" } else { code };
        fixtures::series::by_code(lookup)
            .ok_or_else(|| RollfolioError::not_found(format!("price history for {fund}")))
    }
}
