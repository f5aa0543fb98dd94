use crate::models::ErrorResponse;
use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use stock::StockError;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Stock(#[from] StockError),

    /// No item of a batch succeeded.
    #[error("no stock found")]
    NotFound,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Stock(StockError::OutOfStock { .. }) => StatusCode::NOT_FOUND,
            ApiError::Stock(StockError::Internal { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            info!("{}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
