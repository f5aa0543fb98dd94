use crate::ports::KeyValueStore;
use shared::Result;
use shared::config::Config;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

/// Bounds applied to a requested TTL before it reaches the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlPolicy {
    pub default_secs: i64,
    pub max_secs: i64,
}

impl TtlPolicy {
    pub fn new(default_secs: i64, max_secs: i64) -> Self {
        Self {
            default_secs,
            max_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ttl_default, config.ttl_max)
    }

    /// Accepts `requested` only inside `(0, max)`, otherwise the default.
    pub fn normalize(&self, requested: i64) -> i64 {
        if requested > 0 && requested < self.max_secs {
            requested
        } else {
            self.default_secs
        }
    }
}

/// Namespacing, TTL-clamping front for a [`KeyValueStore`].
///
/// Stateless apart from its configuration, so clones are cheap and share the
/// same backend handle.
#[derive(Clone)]
pub struct StoreAdapter {
    store: Arc<dyn KeyValueStore>,
    prefix: Arc<str>,
    policy: TtlPolicy,
}

impl StoreAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>, policy: TtlPolicy) -> Self {
        Self {
            store,
            prefix: Arc::from(prefix.into()),
            policy,
        }
    }

    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        Self::new(store, config.key_prefix.clone(), TtlPolicy::from_config(config))
    }

    pub fn policy(&self) -> TtlPolicy {
        self.policy
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Stores `value` with the normalized TTL and returns that TTL in seconds.
    pub async fn set(&self, key: &str, value: impl Display, requested_ttl: i64) -> Result<i64> {
        let ttl = self.policy.normalize(requested_ttl);
        // normalize() only ever yields a positive value or the configured default
        let expiry = Duration::from_secs(ttl.max(0) as u64);
        self.store
            .set(&self.prefixed(key), value.to_string(), expiry)
            .await?;
        Ok(ttl)
    }

    pub async fn get(&self, key: &str) -> Result<String> {
        self.store.get(&self.prefixed(key)).await
    }

    /// Remaining TTL in whole seconds.
    pub async fn ttl(&self, key: &str) -> Result<i64> {
        let remaining = self.store.ttl(&self.prefixed(key)).await?;
        Ok(i64::try_from(remaining.as_secs()).unwrap_or(i64::MAX))
    }
}

impl std::fmt::Debug for StoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAdapter")
            .field("prefix", &self.prefix)
            .field("policy", &self.policy)
            .finish()
    }
}
