#![doc = include_str!("../README.md")]
//! rollfolio-middleware
//!
//! Re-exports for middleware wrappers.

mod builder;
mod cache;

pub use crate::builder::ConnectorBuilder;
pub use crate::cache::{CacheMiddleware, CachingConnector};
