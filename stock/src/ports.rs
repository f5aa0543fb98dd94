#![deny(clippy::all)]

use async_trait::async_trait;
use shared::Result;
use std::time::Duration;

// Ports are the pluggable extension points for the underlying key/value store

/// Port for a key/value store with native per-key expiry (e.g., Redis)
///
/// Keys arrive fully namespaced; backends store them verbatim.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Write `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Read the value under `key`; `Error::NotFound` when absent or expired
    async fn get(&self, key: &str) -> Result<String>;

    /// Remaining time to live of `key`
    async fn ttl(&self, key: &str) -> Result<Duration>;
}
