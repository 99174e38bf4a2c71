use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use rollfolio_core::connector::PriceHistoryProvider;
use rollfolio_core::{Fund, FundConnector, FundKind, PriceHistory, RollfolioError};
use rollfolio_types::CacheConfig;

/// Identity of a fund for caching discrimination. Titles do not take part.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FundKey {
    kind: FundKind,
    code: String,
}

impl From<&Fund> for FundKey {
    fn from(f: &Fund) -> Self {
        Self {
            kind: f.kind,
            code: f.code.clone(),
        }
    }
}

/// Middleware descriptor that wraps a connector in a [`CachingConnector`].
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl rollfolio_core::Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn FundConnector>) -> Arc<dyn FundConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_capacity": self.cfg.max_capacity,
            "ttl_ms": self.cfg.ttl.map(|d| d.as_millis()),
        })
    }
}

/// Connector wrapper that memoizes successful price-history fetches.
///
/// Concurrent requests for the same fund share one in-flight fetch. Errors are
/// returned to every waiter and never stored, so the next call retries.
pub struct CachingConnector {
    inner: Arc<dyn FundConnector>,
    // `None` when caching is disabled (capacity 0).
    store: Option<Cache<FundKey, PriceHistory>>,
}

impl CachingConnector {
    /// Wrap `inner` with a cache sized and aged according to `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn FundConnector>, cfg: &CacheConfig) -> Self {
        let store = (cfg.max_capacity > 0).then(|| {
            let builder = Cache::builder().max_capacity(cfg.max_capacity);
            match cfg.ttl {
                Some(ttl) => builder.time_to_live(ttl).build(),
                None => builder.build(),
            }
        });
        Self { inner, store }
    }

    /// Number of cached histories (approximate until pending maintenance runs).
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.store.as_ref().map_or(0, Cache::entry_count)
    }

    /// Drop every cached history.
    pub fn clear(&self) {
        if let Some(store) = &self.store {
            store.invalidate_all();
        }
    }

    fn inner_provider(&self) -> Result<&dyn PriceHistoryProvider, RollfolioError> {
        self.inner
            .as_price_history_provider()
            .ok_or_else(|| RollfolioError::unsupported("price-history"))
    }
}

#[async_trait]
impl FundConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn supports_kind(&self, kind: FundKind) -> bool {
        self.inner.supports_kind(kind)
    }

    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        self.inner
            .as_price_history_provider()
            .map(|_| self as &dyn PriceHistoryProvider)
    }
}

#[async_trait]
impl PriceHistoryProvider for CachingConnector {
    async fn price_history(&self, fund: &Fund) -> Result<PriceHistory, RollfolioError> {
        let inner = self.inner_provider()?;
        let Some(store) = &self.store else {
            return inner.price_history(fund).await;
        };
        store
            .try_get_with(FundKey::from(fund), async {
                #[cfg(feature = "tracing")]
                tracing::debug!(fund = %fund, "price history cache miss");
                inner.price_history(fund).await
            })
            .await
            .map_err(Arc::unwrap_or_clone)
    }
}
