//! In-memory key/value store for service and adapter tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use shared::{Error, Result};
use tokio::sync::RwLock;

use crate::ports::KeyValueStore;

/// Store double with injectable latency and failures.
///
/// TTLs are reported exactly as written; nothing expires.
#[derive(Default)]
pub struct MockStore {
    entries: RwLock<HashMap<String, (String, Option<Duration>)>>,
    latency: Duration,
    fail_sets: bool,
    fail_gets: HashSet<String>,
    fail_ttls: HashSet<String>,
    panic_gets: HashSet<String>,
    calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn failing_sets(mut self) -> Self {
        self.fail_sets = true;
        self
    }

    pub fn failing_get(mut self, key: &str) -> Self {
        self.fail_gets.insert(key.to_string());
        self
    }

    pub fn failing_ttl(mut self, key: &str) -> Self {
        self.fail_ttls.insert(key.to_string());
        self
    }

    pub fn panicking_get(mut self, key: &str) -> Self {
        self.panic_gets.insert(key.to_string());
        self
    }

    /// Seeds a raw entry; `None` leaves the key without expiry.
    pub async fn insert(&self, key: &str, value: &str, ttl: Option<Duration>) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), ttl));
    }

    pub async fn raw(&self, key: &str) -> Option<(String, Option<Duration>)> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn round_trip(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.round_trip().await;
        if self.fail_sets {
            return Err(Error::Store("connection reset by peer".to_string()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, Some(ttl)));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String> {
        self.round_trip().await;
        if self.panic_gets.contains(key) {
            panic!("simulated store crash on {}", key);
        }
        if self.fail_gets.contains(key) {
            return Err(Error::Store("read timed out".to_string()));
        }
        self.entries
            .read()
            .await
            .get(key)
            .map(|(value, _)| value.clone())
            .ok_or(Error::NotFound)
    }

    async fn ttl(&self, key: &str) -> Result<Duration> {
        self.round_trip().await;
        if self.fail_ttls.contains(key) {
            return Err(Error::Store("read timed out".to_string()));
        }
        match self.entries.read().await.get(key) {
            Some((_, Some(ttl))) => Ok(*ttl),
            Some((_, None)) => Err(Error::NoExpiry),
            None => Err(Error::NotFound),
        }
    }
}
