//! Builder for composing connectors with middleware layers.
//!
//! Layers form an "onion" around the raw connector. The `layers` vector stores
//! middleware outermost-first (last added = outermost) and `build()` applies
//! them in reverse to produce `layers[0](layers[1](...(raw)))`. This matches
//! [`MiddlewareStack`](rollfolio_types::MiddlewareStack), where `layers[0]` is
//! the outermost layer.

use std::sync::Arc;
use std::time::Duration;

use rollfolio_core::{FundConnector, Middleware};
use rollfolio_types::{CacheConfig, MiddlewareLayer, MiddlewareStack};
use serde_json::json;

use crate::cache::CacheMiddleware;

const CACHE_LAYER: &str = "CachingMiddleware";

/// Generic middleware builder for composing a connector with layered wrappers.
pub struct ConnectorBuilder {
    raw: Arc<dyn FundConnector>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn FundConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the price-history cache at the outermost position.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self.layers
            .insert(0, Box::new(CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove the cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current middleware stack for inspection.
    ///
    /// The raw connector is appended as the innermost "layer" for observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawConnector",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Rebuild a builder from a raw connector and a stack produced by
    /// [`to_stack`](Self::to_stack). Unknown layers are ignored.
    #[must_use]
    pub fn from_stack(raw: Arc<dyn FundConnector>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            if l.name == CACHE_LAYER {
                let defaults = CacheConfig::default();
                let max_capacity = l
                    .config
                    .get("max_capacity")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(defaults.max_capacity);
                let ttl = l
                    .config
                    .get("ttl_ms")
                    .and_then(serde_json::Value::as_u64)
                    .map(Duration::from_millis);
                layers.push(Box::new(CacheMiddleware::new(CacheConfig {
                    max_capacity,
                    ttl,
                })));
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped connector, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn FundConnector> {
        let mut acc: Arc<dyn FundConnector> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
