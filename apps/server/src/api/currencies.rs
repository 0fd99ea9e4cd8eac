use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use pricewatch_core::constants::INGESTION_PAGE_SIZE;

use super::dto::{
    data, ApiJson, ApiQuery, CurrencyResponse, Envelope, ListParams, MessageResponse,
    SymbolRequest,
};
use crate::{error::ApiResult, main_lib::AppState};

async fn add_currency(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<SymbolRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<CurrencyResponse>>)> {
    let currency = state.currency_service.add_currency(&body.symbol).await?;
    Ok((StatusCode::CREATED, data(CurrencyResponse::from(currency))))
}

async fn remove_currency(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<SymbolRequest>,
) -> ApiResult<Json<Envelope<MessageResponse>>> {
    state.currency_service.remove_currency(&body.symbol).await?;
    Ok(data(MessageResponse {
        message: format!("removed {}", body.symbol.trim().to_uppercase()),
    }))
}

async fn list_currencies(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Envelope<Vec<CurrencyResponse>>>> {
    let currencies = state.currency_service.list_currencies(
        params.limit.unwrap_or(INGESTION_PAGE_SIZE),
        params.offset.unwrap_or(0),
    )?;
    Ok(data(
        currencies.into_iter().map(CurrencyResponse::from).collect(),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currency/add", post(add_currency))
        .route("/currency/remove", post(remove_currency))
        .route("/currency/list", get(list_currencies))
}
