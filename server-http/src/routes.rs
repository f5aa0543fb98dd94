use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Build and configure the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stock routes
        .route(
            "/stock",
            get(handlers::get_stock_list).put(handlers::upsert_stock_list),
        )
        .route(
            "/stock/{product_id}",
            get(handlers::get_stock).put(handlers::upsert_stock),
        )
        // Middleware
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("s-maxage=0"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
