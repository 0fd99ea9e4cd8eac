//! Request and response bodies of the HTTP API.

use axum::{extract::FromRequest, extract::FromRequestParts, Json};
use chrono::SecondsFormat;
use pricewatch_core::currencies::Currency;
use pricewatch_core::prices::{PriceQueryResult, PriceSnapshot};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// `axum::Json` with rejections rendered as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with rejections rendered as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Every successful body is wrapped as `{"data": ...}`.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

pub fn data<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope { data })
}

#[derive(Deserialize)]
pub struct SymbolRequest {
    pub symbol: String,
}

#[derive(Deserialize)]
pub struct PriceQueryRequest {
    pub symbol: String,
    /// Unix seconds.
    pub timestamp: i64,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub symbol: String,
    pub start: i64,
    pub end: i64,
}

#[derive(Serialize)]
pub struct CurrencyResponse {
    pub id: String,
    pub symbol: String,
    pub created_at: String,
}

impl From<Currency> for CurrencyResponse {
    fn from(currency: Currency) -> Self {
        Self {
            id: currency.id,
            symbol: currency.symbol,
            created_at: currency
                .created_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct PriceQueryResponse {
    pub symbol: String,
    pub requested_timestamp: i64,
    pub returned_timestamp: i64,
    pub price: f64,
}

impl From<PriceQueryResult> for PriceQueryResponse {
    fn from(result: PriceQueryResult) -> Self {
        Self {
            symbol: result.symbol,
            requested_timestamp: result.requested_timestamp.timestamp(),
            returned_timestamp: result.returned_timestamp.timestamp(),
            price: result.price,
        }
    }
}

#[derive(Serialize)]
pub struct PricePointResponse {
    pub timestamp: i64,
    pub price: f64,
}

impl From<PriceSnapshot> for PricePointResponse {
    fn from(snapshot: PriceSnapshot) -> Self {
        Self {
            timestamp: snapshot.timestamp.timestamp(),
            price: snapshot.price,
        }
    }
}
