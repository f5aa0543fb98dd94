//! Stock availability cache core.
//!
//! Per-product unit counters live in an external key/value store with a
//! native expiry. [`StockService`] reads and writes them one product at a
//! time or in batches that fan out one task per item.

pub mod adapter;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

#[cfg(test)]
mod mocks;

pub use adapter::{StoreAdapter, TtlPolicy};
pub use domain::{ProductId, StockBatchResult, StockRecord};
pub use error::StockError;
pub use ports::KeyValueStore;
pub use service::StockService;
