pub mod health;
pub mod stock_ops;

pub use health::health_check;
pub use stock_ops::{get_stock, get_stock_list, upsert_stock, upsert_stock_list};
