use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};

use super::dto::{
    data, ApiJson, ApiQuery, Envelope, HistoryParams, PricePointResponse, PriceQueryRequest,
    PriceQueryResponse,
};
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

fn unix_to_utc(field: &str, secs: i64) -> ApiResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ApiError::BadRequest(format!("{} out of range", field)))
}

async fn get_price(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<PriceQueryRequest>,
) -> ApiResult<Json<Envelope<PriceQueryResponse>>> {
    if body.timestamp <= 0 {
        return Err(ApiError::BadRequest("timestamp must be > 0".to_string()));
    }
    let at = unix_to_utc("timestamp", body.timestamp)?;
    let result = state.price_service.get_price(&body.symbol, at)?;
    Ok(data(PriceQueryResponse::from(result)))
}

async fn get_price_history(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<HistoryParams>,
) -> ApiResult<Json<Envelope<Vec<PricePointResponse>>>> {
    let start = unix_to_utc("start", params.start)?;
    let end = unix_to_utc("end", params.end)?;
    let history = state
        .price_service
        .get_price_history(&params.symbol, start, end)?;
    Ok(data(
        history.into_iter().map(PricePointResponse::from).collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currency/price", post(get_price))
        .route("/currency/history", get(get_price_history))
}
