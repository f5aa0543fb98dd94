pub mod moka_store;
pub mod redis_store;

pub use moka_store::MokaStore;
pub use redis_store::RedisStore;

use shared::Result;
use shared::config::{Config, StoreBackend};
use std::sync::Arc;
use stock::ports::KeyValueStore;
use tracing::info;

/// Open the backend selected by `config.store`
pub async fn connect(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    info!("Opening {} store", config.store);
    match config.store {
        StoreBackend::Redis => Ok(Arc::new(RedisStore::connect(&config.redis_url).await?)),
        StoreBackend::Memory => Ok(Arc::new(MokaStore::new("stock", None))),
    }
}
