use crate::domain::ProductId;
use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StockError {
    /// No positive, unexpired unit count for the product.
    #[error("product {product_id} is out of stock")]
    OutOfStock { product_id: ProductId },

    #[error("internal error for product {product_id}: {source}")]
    Internal {
        product_id: ProductId,
        #[source]
        source: Cause,
    },
}

impl StockError {
    pub fn out_of_stock(product_id: ProductId) -> Self {
        StockError::OutOfStock { product_id }
    }

    pub fn internal(product_id: ProductId, source: impl Into<Cause>) -> Self {
        StockError::Internal {
            product_id,
            source: source.into(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        match self {
            StockError::OutOfStock { product_id } | StockError::Internal { product_id, .. } => {
                *product_id
            }
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, StockError::OutOfStock { .. })
    }
}
