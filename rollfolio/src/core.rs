use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Local;
use rollfolio_core::{CalendarIndex, Fund, FundConnector, FundKind, PriceHistory, RollfolioError};
use rollfolio_middleware::ConnectorBuilder;
use rollfolio_types::{CacheConfig, CalendarPolicy, RollfolioConfig};

pub(crate) const PRICE_HISTORY: &str = "price-history";

/// Orchestrator that fetches price histories across registered providers and
/// computes rolling SIP returns over them.
pub struct Rollfolio {
    pub(crate) connectors: Vec<Arc<dyn FundConnector>>,
    pub(crate) cfg: RollfolioConfig,
    calendar: RwLock<Arc<CalendarIndex>>,
}

/// Builder for constructing a `Rollfolio` orchestrator with custom configuration.
pub struct RollfolioBuilder {
    connectors: Vec<Arc<dyn FundConnector>>,
    cfg: RollfolioConfig,
    cache: Option<CacheConfig>,
    calendar: Option<Arc<CalendarIndex>>,
}

impl Default for RollfolioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RollfolioBuilder {
    /// Create a new builder with default configuration and no connectors.
    ///
    /// Defaults: 10 000 per monthly contribution, initial XIRR guess 0.1,
    /// a pinned calendar, 30s provider timeout, no caching.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: RollfolioConfig::default(),
            cache: None,
            calendar: None,
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the fallback order among connectors that support
    /// a fund's kind. Duplicates are not deduplicated.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn FundConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: RollfolioConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Amount invested on every monthly purchase date.
    #[must_use]
    pub const fn contribution_amount(mut self, amount: f64) -> Self {
        self.cfg.rolling.contribution_amount = amount;
        self
    }

    /// First seed tried by the XIRR solver.
    #[must_use]
    pub const fn initial_guess(mut self, guess: f64) -> Self {
        self.cfg.rolling.initial_guess = guess;
        self
    }

    /// Select how the calendar's "today" tracks the wall clock.
    ///
    /// - `Pinned`: "today" is fixed when the orchestrator is built.
    /// - `RefreshDaily`: a fresh calendar is swapped in on the first request
    ///   after the local date advances. In-flight jobs keep the old one.
    #[must_use]
    pub const fn calendar_policy(mut self, policy: CalendarPolicy) -> Self {
        self.cfg.calendar_policy = policy;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Wrap every registered connector in a price-history cache at build time.
    #[must_use]
    pub fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cache = Some(cfg);
        self
    }

    /// Use an explicit calendar instead of one pinned to the current date.
    #[must_use]
    pub fn calendar(mut self, calendar: Arc<CalendarIndex>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Build the `Rollfolio` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector), or if the rolling configuration
    /// is unusable.
    pub fn build(self) -> Result<Rollfolio, RollfolioError> {
        if self.connectors.is_empty() {
            return Err(RollfolioError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        let amount = self.cfg.rolling.contribution_amount;
        if !(amount.is_finite() && amount > 0.0) {
            return Err(RollfolioError::InvalidArg(format!(
                "contribution amount must be positive, got {amount}"
            )));
        }

        let connectors = match &self.cache {
            Some(cache) => self
                .connectors
                .into_iter()
                .map(|c| ConnectorBuilder::new(c).with_cache(cache).build())
                .collect(),
            None => self.connectors,
        };
        let calendar = self
            .calendar
            .unwrap_or_else(|| Arc::new(CalendarIndex::new()));

        Ok(Rollfolio {
            connectors,
            cfg: self.cfg,
            calendar: RwLock::new(calendar),
        })
    }
}

/// Attribute an untagged error to the connector that produced it.
pub(crate) fn tag_err(connector: &str, e: RollfolioError) -> RollfolioError {
    match e {
        e @ (RollfolioError::NotFound { .. }
        | RollfolioError::ProviderTimeout { .. }
        | RollfolioError::Provider { .. }
        | RollfolioError::AllProvidersFailed(_)) => e,
        other => RollfolioError::provider(connector, other.to_string()),
    }
}

impl Rollfolio {
    /// Start building a new `Rollfolio` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use rollfolio_mock::MockConnector;
    ///
    /// let rf = rollfolio::Rollfolio::builder()
    ///     .with_connector(Arc::new(MockConnector::new()))
    ///     .contribution_amount(5_000.0)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> RollfolioBuilder {
        RollfolioBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RollfolioConfig {
        &self.cfg
    }

    /// Calendar to use for the next request under the active policy.
    pub fn calendar(&self) -> Arc<CalendarIndex> {
        let current = Arc::clone(&self.calendar.read().unwrap_or_else(PoisonError::into_inner));
        if self.cfg.calendar_policy != CalendarPolicy::RefreshDaily {
            return current;
        }
        let today = Local::now().date_naive();
        if today <= current.today() {
            return current;
        }
        let mut guard = self
            .calendar
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another request may have refreshed it while we waited for the lock.
        if guard.today() < today {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = %guard.today(), to = %today, "refreshing calendar");
            *guard = Arc::new(CalendarIndex::with_today(today));
        }
        Arc::clone(&guard)
    }

    pub(crate) fn ordered_for_kind(&self, kind: FundKind) -> Vec<Arc<dyn FundConnector>> {
        self.connectors
            .iter()
            .filter(|c| c.supports_kind(kind))
            .cloned()
            .collect()
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rollfolio::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, RollfolioError>
    where
        Fut: core::future::Future<Output = Result<T, RollfolioError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(RollfolioError::provider_timeout(connector_name, capability)))
    }

    /// Fetch a price history, trying eligible providers in registration order.
    ///
    /// - Each provider call is bounded by the configured timeout.
    /// - An empty history defers to the next provider; if every provider comes
    ///   back empty, the first empty history is returned.
    /// - Failures are collapsed with [`collapse_errors`](crate::collapse_errors).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rollfolio::core::fetch_price_history",
            skip(self, fund),
            fields(fund = %fund),
        )
    )]
    pub(crate) async fn fetch_price_history(
        &self,
        fund: &Fund,
    ) -> Result<PriceHistory, RollfolioError> {
        let mut attempted_any = false;
        let mut errors: Vec<RollfolioError> = Vec::new();
        let mut first_empty: Option<PriceHistory> = None;

        for c in self.ordered_for_kind(fund.kind) {
            let Some(provider) = c.as_price_history_provider() else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                PRICE_HISTORY,
                self.cfg.provider_timeout,
                provider.price_history(fund),
            )
            .await
            {
                Ok(history) if history.observations.is_empty() => {
                    if first_empty.is_none() {
                        first_empty = Some(history);
                    }
                }
                Ok(history) => return Ok(history),
                Err(e @ (RollfolioError::NotFound { .. } | RollfolioError::ProviderTimeout { .. })) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(connector = c.name(), error = %e, "provider miss; falling back");
                    errors.push(e);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(connector = c.name(), error = %e, "provider failed; falling back");
                    errors.push(tag_err(c.name(), e));
                }
            }
        }

        if let Some(history) = first_empty {
            return Ok(history);
        }
        Err(crate::collapse_errors(
            PRICE_HISTORY,
            attempted_any,
            errors,
            Some(format!("price history for {fund}")),
        ))
    }
}
