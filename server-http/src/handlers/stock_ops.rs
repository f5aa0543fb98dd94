use crate::error::ApiError;
use crate::models::{StockListResponse, UpsertStockListRequest, UpsertStockRequest};
use crate::state::AppState;
use crate::validation::StockRequestValidator;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use stock::{ProductId, StockBatchResult, StockRecord};
use tracing::{info, warn};

fn product_id(path: Result<Path<ProductId>, PathRejection>) -> Result<ProductId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// Logs the per-item failures a batch response does not carry.
fn into_response_list(batch: StockBatchResult) -> Result<Json<StockListResponse>, ApiError> {
    let (stock, errors) = batch.into_parts();
    for err in &errors {
        warn!("batch item failed: {}", err);
    }
    if stock.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(StockListResponse { stock }))
}

/// PUT /stock/{product_id}
pub async fn upsert_stock(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<UpsertStockRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StockRecord>), ApiError> {
    let product_id = product_id(path)?;
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    info!("UPSERT: product={}", product_id);

    let record = StockRequestValidator::upsert(product_id, req)?;
    let result = state.stock_service.upsert_stock(product_id, &record).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// PUT /stock
pub async fn upsert_stock_list(
    State(state): State<AppState>,
    payload: Result<Json<UpsertStockListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StockListResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let records = StockRequestValidator::upsert_list(req)?;
    info!("UPSERT LIST: {} item(s)", records.len());

    let batch = state.stock_service.upsert_stock_list(records).await;

    into_response_list(batch).map(|body| (StatusCode::CREATED, body))
}

/// GET /stock/{product_id}
pub async fn get_stock(
    State(state): State<AppState>,
    path: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<StockRecord>, ApiError> {
    let product_id = product_id(path)?;
    info!("GET: product={}", product_id);

    let record = state.stock_service.get_stock(product_id).await?;
    Ok(Json(record))
}

/// GET /stock?productId=1&productId=2
pub async fn get_stock_list(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<StockListResponse>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let product_ids = StockRequestValidator::product_ids(&params)?;
    info!("GET LIST: {} product(s)", product_ids.len());

    let batch = state.stock_service.get_stock_list(product_ids).await;

    into_response_list(batch)
}
