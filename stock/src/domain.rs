use crate::error::StockError;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// Cached availability of one product.
///
/// On write `ttl_seconds` is the requested expiry, on read it is the expiry
/// remaining in the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub product_id: ProductId,
    pub units: i64,
    #[serde(default)]
    pub ttl_seconds: i64,
}

impl StockRecord {
    pub fn new(product_id: ProductId, units: i64, ttl_seconds: i64) -> Self {
        Self {
            product_id,
            units,
            ttl_seconds,
        }
    }

    /// Store key for a product, before the adapter applies its prefix.
    pub fn key(product_id: ProductId) -> String {
        product_id.to_string()
    }
}

/// Outcome of a batch call: resolved records plus one error per failed item.
#[derive(Debug, Default)]
pub struct StockBatchResult {
    stock: Vec<StockRecord>,
    errors: Vec<StockError>,
}

impl StockBatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stock(&mut self, record: StockRecord) {
        self.stock.push(record);
    }

    pub fn add_error(&mut self, error: StockError) {
        self.errors.push(error);
    }

    /// Files one per-item outcome into exactly one of the two collections.
    pub fn record(&mut self, outcome: Result<StockRecord, StockError>) {
        match outcome {
            Ok(record) => self.add_stock(record),
            Err(error) => self.add_error(error),
        }
    }

    pub fn has_stock(&self) -> bool {
        !self.stock.is_empty()
    }

    pub fn stock(&self) -> &[StockRecord] {
        &self.stock
    }

    pub fn errors(&self) -> &[StockError] {
        &self.errors
    }

    /// Number of items that contributed an outcome.
    pub fn len(&self) -> usize {
        self.stock.len() + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_parts(self) -> (Vec<StockRecord>, Vec<StockError>) {
        (self.stock, self.errors)
    }
}

impl Extend<Result<StockRecord, StockError>> for StockBatchResult {
    fn extend<I: IntoIterator<Item = Result<StockRecord, StockError>>>(&mut self, iter: I) {
        for outcome in iter {
            self.record(outcome);
        }
    }
}

impl FromIterator<Result<StockRecord, StockError>> for StockBatchResult {
    fn from_iter<I: IntoIterator<Item = Result<StockRecord, StockError>>>(iter: I) -> Self {
        let mut batch = Self::new();
        batch.extend(iter);
        batch
    }
}
