use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use rollfolio_core::connector::PriceHistoryProvider;
use rollfolio_core::{Fund, FundConnector, FundKind, PriceHistory, RollfolioError};

/// Instruction for how a fetch should behave for a given fund code.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(RollfolioError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior<PriceHistory>>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicUsize>,
}

impl DynamicMockController {
    /// Set the behavior for fetches of a specific fund code.
    pub async fn set_behavior(&self, code: impl Into<String>, behavior: MockBehavior<PriceHistory>) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(code.into(), behavior);
    }

    /// Number of fetches the connector has received.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Clear all configured behaviors.
    pub async fn clear_all_behaviors(&self) {
        self.state.lock().await.rules.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    kinds: &'static [FundKind],
    state: Arc<Mutex<InternalState>>,
    calls: Arc<AtomicUsize>,
}

impl DynamicMockConnector {
    /// Create a connector supporting every fund kind, plus its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn FundConnector>, DynamicMockController) {
        Self::new_for_kinds(name, &[FundKind::MutualFund, FundKind::Index])
    }

    /// Create a connector that only claims the given kinds, plus its controller.
    #[must_use]
    pub fn new_for_kinds(
        name: &'static str,
        kinds: &'static [FundKind],
    ) -> (Arc<dyn FundConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let calls = Arc::new(AtomicUsize::new(0));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            calls: Arc::clone(&calls),
        };
        let me = Arc::new(Self {
            name,
            kinds,
            state,
            calls,
        });
        (me as Arc<dyn FundConnector>, controller)
    }
}

#[async_trait]
impl FundConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn supports_kind(&self, kind: FundKind) -> bool {
        self.kinds.contains(&kind)
    }

    fn as_price_history_provider(&self) -> Option<&dyn PriceHistoryProvider> {
        Some(self as &dyn PriceHistoryProvider)
    }
}

#[async_trait]
impl PriceHistoryProvider for DynamicMockConnector {
    async fn price_history(&self, fund: &Fund) -> Result<PriceHistory, RollfolioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let guard = self.state.lock().await;
            guard.rules.get(&fund.code).cloned()
        };
        match behavior {
            Some(MockBehavior::Return(history)) => Ok(history),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(RollfolioError::not_found(format!("price history for {fund}"))),
        }
    }
}
