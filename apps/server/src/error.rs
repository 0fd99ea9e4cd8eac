use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pricewatch_core::currencies::CurrencyError;
use pricewatch_core::errors::Error as CoreError;
use pricewatch_core::price_source::PriceSourceError;
use pricewatch_core::prices::PriceError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => core_status(e),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Currency(CurrencyError::InvalidSymbol(_)) => StatusCode::BAD_REQUEST,
        CoreError::Currency(CurrencyError::DuplicateCurrency(_)) => StatusCode::CONFLICT,
        CoreError::Currency(CurrencyError::NotTracked(_)) => StatusCode::NOT_FOUND,
        CoreError::Price(PriceError::PriceNotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Price(PriceError::DuplicatePrice { .. }) => StatusCode::CONFLICT,
        CoreError::Price(_) | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::PriceSource(PriceSourceError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
        CoreError::PriceSource(_) => StatusCode::BAD_GATEWAY,
        CoreError::Database(_) | CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            tracing::error!("Request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("invalid JSON: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("invalid query: {}", rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
