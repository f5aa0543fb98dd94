use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use shared::{Error, Result};
use std::fmt::Debug;
use std::time::{Duration, Instant};
use stock::ports::KeyValueStore;

#[derive(Clone, Debug)]
struct Entry {
    value: String,
    ttl: Duration,
    expires_at: Instant,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Moka-based in-process store with per-key TTL
/// Stands in for Redis in development and tests
pub struct MokaStore {
    cache: Cache<String, Entry>,
}

impl MokaStore {
    /// Create a Moka store, optionally bounded to `max_entries`
    pub fn new(name: &str, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().name(name).expire_after(PerEntryTtl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl KeyValueStore for MokaStore {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let entry = Entry {
            value,
            ttl,
            expires_at: Instant::now() + ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String> {
        match self.cache.get(key).await {
            Some(entry) => Ok(entry.value),
            None => Err(Error::NotFound), // Either doesn't exist or TTL expired
        }
    }

    async fn ttl(&self, key: &str) -> Result<Duration> {
        let entry = self.cache.get(key).await.ok_or(Error::NotFound)?;
        let remaining = entry.expires_at.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(Error::NotFound);
        }
        Ok(remaining)
    }
}

impl Debug for MokaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStore")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_moka_store_set_and_get() {
        let store = MokaStore::new("test", None);

        store
            .set("stock::1", "5".to_string(), Duration::from_secs(30))
            .await
            .unwrap();

        assert_eq!(store.get("stock::1").await.unwrap(), "5");
    }

    #[tokio::test]
    async fn test_moka_store_ttl_counts_down() {
        let store = MokaStore::new("test", None);

        store
            .set("stock::1", "5".to_string(), Duration::from_secs(30))
            .await
            .unwrap();

        let remaining = store.ttl("stock::1").await.unwrap();
        assert!(remaining <= Duration::from_secs(30));
        assert!(remaining > Duration::from_secs(29));
    }

    #[tokio::test]
    async fn test_moka_store_get_nonexistent() {
        let store = MokaStore::new("test", None);

        assert!(matches!(store.get("missing").await, Err(Error::NotFound)));
        assert!(matches!(store.ttl("missing").await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn test_moka_store_overwrite_resets_ttl() {
        let store = MokaStore::new("test", None);

        store
            .set("key", "1".to_string(), Duration::from_secs(5))
            .await
            .unwrap();
        store
            .set("key", "2".to_string(), Duration::from_secs(500))
            .await
            .unwrap();

        assert_eq!(store.get("key").await.unwrap(), "2");
        assert!(store.ttl("key").await.unwrap() > Duration::from_secs(400));
    }

    #[tokio::test]
    async fn test_moka_store_entries_expire() {
        let store = MokaStore::new("test", None);

        store
            .set("short", "1".to_string(), Duration::from_millis(100))
            .await
            .unwrap();
        store
            .set("long", "1".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert!(store.get("short").await.is_ok());

        // Wait for expiration
        sleep(Duration::from_millis(150)).await;

        assert!(matches!(store.get("short").await, Err(Error::NotFound)));
        assert!(matches!(store.ttl("short").await, Err(Error::NotFound)));
        assert!(store.get("long").await.is_ok());
    }
}
