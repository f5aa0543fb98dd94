use crate::adapter::StoreAdapter;
use crate::domain::{ProductId, StockBatchResult, StockRecord};
use crate::error::StockError;
use futures::future::join_all;
use std::future::Future;
use tracing::{debug, info, warn};

/// Application service that orchestrates stock reads and writes
///
/// The store adapter is injected; the service keeps no stock in memory and
/// every read goes back to the store.
#[derive(Clone, Debug)]
pub struct StockService {
    store: StoreAdapter,
}

impl StockService {
    pub fn new(store: StoreAdapter) -> Self {
        Self { store }
    }

    /// Writes `record.units` for `product_id` and echoes the normalized TTL.
    pub async fn upsert_stock(
        &self,
        product_id: ProductId,
        record: &StockRecord,
    ) -> Result<StockRecord, StockError> {
        let key = StockRecord::key(product_id);
        let ttl = self
            .store
            .set(&key, record.units, record.ttl_seconds)
            .await
            .map_err(|e| StockError::internal(product_id, e))?;

        debug!(product_id, units = record.units, ttl, "stock upserted");
        Ok(StockRecord::new(product_id, record.units, ttl))
    }

    /// Reads units and remaining TTL for `product_id`.
    ///
    /// Both lookups run concurrently and both are awaited. A failed units
    /// lookup always wins and reads as out of stock; a value that is not an
    /// integer is an internal fault.
    pub async fn get_stock(&self, product_id: ProductId) -> Result<StockRecord, StockError> {
        let key = StockRecord::key(product_id);
        let (units, ttl) = tokio::join!(self.store.get(&key), self.store.ttl(&key));

        let raw = match units {
            Ok(raw) => raw,
            Err(e) => {
                debug!(product_id, error = %e, "units lookup failed");
                return Err(StockError::out_of_stock(product_id));
            }
        };
        let units: i64 = raw
            .parse()
            .map_err(|e| StockError::internal(product_id, e))?;
        if units <= 0 {
            return Err(StockError::out_of_stock(product_id));
        }
        let ttl = ttl.map_err(|e| {
            debug!(product_id, error = %e, "ttl lookup failed");
            StockError::out_of_stock(product_id)
        })?;

        Ok(StockRecord::new(product_id, units, ttl))
    }

    /// Upserts every record concurrently; never fails as a whole.
    pub async fn upsert_stock_list(&self, records: Vec<StockRecord>) -> StockBatchResult {
        let batch = self
            .fan_out(records, |service, record| async move {
                service.upsert_stock(record.product_id, &record).await
            })
            .await;

        info!(
            succeeded = batch.stock().len(),
            failed = batch.errors().len(),
            "batch upsert finished"
        );
        batch
    }

    /// Reads every product concurrently; never fails as a whole.
    pub async fn get_stock_list(&self, product_ids: Vec<ProductId>) -> StockBatchResult {
        let batch = self
            .fan_out(product_ids, |service, product_id| async move {
                service.get_stock(product_id).await
            })
            .await;

        info!(
            succeeded = batch.stock().len(),
            failed = batch.errors().len(),
            "batch read finished"
        );
        batch
    }

    /// Spawns one task per item, waits for all of them, then folds the
    /// outcomes. A task that dies is recorded as an internal error for its
    /// product so every item still yields exactly one outcome.
    async fn fan_out<T, F, Fut>(&self, items: Vec<T>, op: F) -> StockBatchResult
    where
        T: ProductItem + Send + 'static,
        F: Fn(StockService, T) -> Fut,
        Fut: Future<Output = Result<StockRecord, StockError>> + Send + 'static,
    {
        let mut product_ids = Vec::with_capacity(items.len());
        let mut handles = Vec::with_capacity(items.len());
        for item in items {
            product_ids.push(item.product_id());
            handles.push(tokio::spawn(op(self.clone(), item)));
        }

        let joined = join_all(handles).await;

        product_ids
            .into_iter()
            .zip(joined)
            .map(|(product_id, joined)| {
                let outcome = joined.unwrap_or_else(|e| Err(StockError::internal(product_id, e)));
                if let Err(ref e) = outcome {
                    warn!(product_id, error = %e, "batch item failed");
                }
                outcome
            })
            .collect()
    }
}

/// Anything a batch can be keyed by.
trait ProductItem {
    fn product_id(&self) -> ProductId;
}

impl ProductItem for ProductId {
    fn product_id(&self) -> ProductId {
        *self
    }
}

impl ProductItem for StockRecord {
    fn product_id(&self) -> ProductId {
        self.product_id
    }
}
