use std::sync::Arc;
use stock::StockService;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub stock_service: Arc<StockService>,
}

impl AppState {
    pub fn new(stock_service: StockService) -> Self {
        Self {
            stock_service: Arc::new(stock_service),
        }
    }
}
