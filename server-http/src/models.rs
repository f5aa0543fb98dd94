use serde::{Deserialize, Serialize};
use stock::{ProductId, StockRecord};

// === Stock Operation Models ===

/// Body of `PUT /stock/{id}`; the product id comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertStockRequest {
    #[serde(default)]
    pub units: Option<i64>,
    #[serde(default)]
    pub ttl_seconds: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemRequest {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub units: Option<i64>,
    #[serde(default)]
    pub ttl_seconds: i64,
}

/// Body of `PUT /stock`.
#[derive(Debug, Deserialize)]
pub struct UpsertStockListRequest {
    #[serde(default)]
    pub stock: Vec<StockItemRequest>,
}

#[derive(Debug, Serialize)]
pub struct StockListResponse {
    pub stock: Vec<StockRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
