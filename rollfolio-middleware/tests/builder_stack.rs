use std::sync::Arc;
use std::time::Duration;

use rollfolio_core::{FundConnector, FundKind};
use rollfolio_middleware::ConnectorBuilder;
use rollfolio_mock::MockConnector;
use rollfolio_types::CacheConfig;

fn raw() -> Arc<dyn FundConnector> {
    Arc::new(MockConnector::new())
}

#[test]
fn stack_lists_cache_then_raw() {
    let cfg = CacheConfig {
        max_capacity: 32,
        ttl: Some(Duration::from_secs(60)),
    };
    let stack = ConnectorBuilder::new(raw()).with_cache(&cfg).to_stack();
    let names: Vec<&str> = stack.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["CachingMiddleware", "RawConnector"]);
    assert_eq!(stack.layers[0].config["max_capacity"], 32);
    assert_eq!(stack.layers[0].config["ttl_ms"], 60_000);
    assert_eq!(stack.layers[1].config["name"], "rollfolio-mock");
}

#[test]
fn with_cache_replaces_and_without_cache_removes() {
    let b = ConnectorBuilder::new(raw())
        .with_cache(&CacheConfig::default())
        .with_cache(&CacheConfig::default());
    assert_eq!(b.to_stack().layers.len(), 2);
    let b = b.without_cache();
    assert_eq!(b.to_stack().layers.len(), 1);
}

#[test]
fn stack_round_trips_through_from_stack() {
    let cfg = CacheConfig {
        max_capacity: 8,
        ttl: None,
    };
    let stack = ConnectorBuilder::new(raw()).with_cache(&cfg).to_stack();
    let rebuilt = ConnectorBuilder::from_stack(raw(), &stack);
    assert_eq!(rebuilt.to_stack(), stack);
}

#[test]
fn wrapped_connector_keeps_identity() {
    let wrapped = ConnectorBuilder::new(raw())
        .with_cache(&CacheConfig::default())
        .build();
    assert_eq!(wrapped.name(), "rollfolio-mock");
    assert_eq!(wrapped.vendor(), "Mock");
    assert!(wrapped.supports_kind(FundKind::Index));
    assert!(wrapped.as_price_history_provider().is_some());
}
