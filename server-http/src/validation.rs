use crate::models::{StockItemRequest, UpsertStockListRequest, UpsertStockRequest};
use stock::{ProductId, StockRecord};

/// Query parameter carrying the ids of a batch read.
pub const PRODUCT_ID_PARAM: &str = "productId";

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingField { field: &'static str, index: Option<usize> },
    EmptyBatch,
    NoProductIds,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField { field, index: None } => {
                write!(f, "Missing required field '{}'", field)
            }
            ValidationError::MissingField {
                field,
                index: Some(index),
            } => {
                write!(f, "Missing required field '{}' in stock item {}", field, index)
            }
            ValidationError::EmptyBatch => write!(f, "Stock list must not be empty"),
            ValidationError::NoProductIds => write!(
                f,
                "At least one integer '{}' query parameter is required",
                PRODUCT_ID_PARAM
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

pub struct StockRequestValidator;

impl StockRequestValidator {
    pub fn upsert(product_id: ProductId, req: UpsertStockRequest) -> Result<StockRecord, ValidationError> {
        let units = req.units.ok_or(ValidationError::MissingField {
            field: "units",
            index: None,
        })?;
        Ok(StockRecord::new(product_id, units, req.ttl_seconds))
    }

    pub fn upsert_list(req: UpsertStockListRequest) -> Result<Vec<StockRecord>, ValidationError> {
        if req.stock.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        req.stock
            .into_iter()
            .enumerate()
            .map(|(index, item)| Self::item(index, item))
            .collect()
    }

    fn item(index: usize, item: StockItemRequest) -> Result<StockRecord, ValidationError> {
        let product_id = item.product_id.ok_or(ValidationError::MissingField {
            field: "productId",
            index: Some(index),
        })?;
        let units = item.units.ok_or(ValidationError::MissingField {
            field: "units",
            index: Some(index),
        })?;
        Ok(StockRecord::new(product_id, units, item.ttl_seconds))
    }

    /// Collects `productId` query values, silently dropping blank or
    /// non-integer ones.
    pub fn product_ids(params: &[(String, String)]) -> Result<Vec<ProductId>, ValidationError> {
        let ids: Vec<ProductId> = params
            .iter()
            .filter(|(name, _)| name == PRODUCT_ID_PARAM)
            .filter_map(|(_, value)| value.parse().ok())
            .collect();

        if ids.is_empty() {
            return Err(ValidationError::NoProductIds);
        }
        Ok(ids)
    }
}
