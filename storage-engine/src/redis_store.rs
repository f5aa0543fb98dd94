use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use shared::{Error, Result};
use std::fmt::Debug;
use std::time::Duration;
use stock::ports::KeyValueStore;
use tracing::{debug, info};

/// Redis-backed store using a multiplexed async connection
///
/// Cloning the connection is cheap and every call pipelines over the same
/// socket, so concurrent batch items do not contend on a pool.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    addr: String,
}

impl RedisStore {
    /// Connect to `url` and verify the server answers `PING`
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url).map_err(store_error)?;
        let addr = client.get_connection_info().addr.to_string();
        info!("Connecting to redis at {}", addr);

        let mut connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(store_error)?;

        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(store_error)?;

        info!("Connected to redis at {}", addr);
        Ok(Self { connection, addr })
    }
}

fn store_error(err: RedisError) -> Error {
    Error::Store(err.to_string())
}

/// Maps a `TTL` reply: -2 is a missing key, -1 a key without expiry.
fn ttl_from_reply(secs: i64) -> Result<Duration> {
    match secs {
        -2 => Err(Error::NotFound),
        -1 => Err(Error::NoExpiry),
        s if s >= 0 => Ok(Duration::from_secs(s as u64)),
        s => Err(Error::Store(format!("unexpected TTL reply {}", s))),
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut conn = self.connection.clone();
        // SET EX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        let _: () = conn
            .set_ex(key, value, seconds)
            .await
            .map_err(store_error)?;
        debug!("SET {} EX {}", key, seconds);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(store_error)?;
        value.ok_or(Error::NotFound)
    }

    async fn ttl(&self, key: &str) -> Result<Duration> {
        let mut conn = self.connection.clone();
        let secs: i64 = conn.ttl(key).await.map_err(store_error)?;
        ttl_from_reply(secs)
    }
}

impl Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("addr", &self.addr)
            .finish()
    }
}
