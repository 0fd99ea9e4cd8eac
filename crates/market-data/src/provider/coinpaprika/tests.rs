use super::*;
use crate::rate_limiter::RateLimitConfig;
use axum::{extract::Path, http::StatusCode as AxumStatus, routing::get, Json, Router};
use serde_json::{json, Value};

async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    // Trailing slash on purpose: the provider must trim it.
    format!("http://{}/", addr)
}

async fn coins() -> Json<Value> {
    Json(json!([
        { "id": "btc-bitcoin", "symbol": "BTC", "type": "coin", "is_active": true },
        { "id": "btc-bitcoin-clone", "symbol": "btc", "type": "coin", "is_active": true },
        { "id": "eth-ethereum", "symbol": "ETH", "type": "coin", "is_active": true },
        { "id": "usdt-tether", "symbol": "USDT", "type": "token", "is_active": true },
        { "id": "dead-deadcoin", "symbol": "DEAD", "type": "coin", "is_active": false }
    ]))
}

async fn ticker(Path(id): Path<String>) -> Result<Json<Value>, AxumStatus> {
    match id.as_str() {
        "btc-bitcoin" => Ok(Json(json!({
            "id": "btc-bitcoin",
            "quotes": { "USD": { "price": 64250.5, "volume_24h": 1.0 } }
        }))),
        "eth-ethereum" => Ok(Json(json!({ "id": "eth-ethereum", "quotes": {} }))),
        _ => Err(AxumStatus::SERVICE_UNAVAILABLE),
    }
}

fn stub_router() -> Router {
    Router::new()
        .route("/v1/coins", get(coins))
        .route("/v1/tickers/{id}", get(ticker))
}

fn fast_limiter() -> Arc<RateLimiter> {
    Arc::new(RateLimiter::new(RateLimitConfig::per_second(1000.0)).unwrap())
}

#[test]
fn test_index_first_symbol_wins() {
    let index = CoinIndex::from_pairs([("btc", "btc-bitcoin"), ("BTC", "btc-other")]);
    assert_eq!(index.coin_id("BTC"), Some("btc-bitcoin"));
    assert_eq!(index.coin_id("btc"), Some("btc-bitcoin"));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_normalize_base_url() {
    assert_eq!(
        normalize_base_url("https://api.coinpaprika.com/"),
        "https://api.coinpaprika.com"
    );
    assert_eq!(normalize_base_url(DEFAULT_BASE_URL), DEFAULT_BASE_URL);
}

#[tokio::test]
async fn test_connect_loads_active_coins_only() {
    let base = spawn_stub(stub_router()).await;
    let provider = CoinPaprikaProvider::connect(&base, fast_limiter())
        .await
        .unwrap();

    assert_eq!(provider.index().len(), 2);
    assert_eq!(provider.index().coin_id("BTC"), Some("btc-bitcoin"));
    assert!(provider.symbol_exists("eth").await.unwrap());
    assert!(!provider.symbol_exists("USDT").await.unwrap());
    assert!(!provider.symbol_exists("DEAD").await.unwrap());
}

#[tokio::test]
async fn test_fetch_price_reads_usd_quote() {
    let base = spawn_stub(stub_router()).await;
    let provider = CoinPaprikaProvider::connect(&base, fast_limiter())
        .await
        .unwrap();
    let before = Utc::now().timestamp();

    let point = provider
        .fetch_price("btc", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(point.symbol, "BTC");
    assert_eq!(point.price, 64250.5);
    assert!(point.timestamp >= before);
}

#[tokio::test]
async fn test_fetch_price_without_usd_quote() {
    let base = spawn_stub(stub_router()).await;
    let provider = CoinPaprikaProvider::connect(&base, fast_limiter())
        .await
        .unwrap();

    let err = provider
        .fetch_price("ETH", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_fetch_price_error_status() {
    let base = spawn_stub(stub_router()).await;
    let index = CoinIndex::from_pairs([("XRP", "xrp-xrp")]);
    let provider = CoinPaprikaProvider::new(&base, index, fast_limiter());

    let err = provider
        .fetch_price("XRP", &CancellationToken::new())
        .await
        .unwrap_err();
    match err {
        MarketDataError::ProviderError { message, .. } => {
            assert_eq!(message, "unexpected status 503")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_price_unknown_symbol() {
    let provider =
        CoinPaprikaProvider::new("http://127.0.0.1:9", CoinIndex::default(), fast_limiter());

    let err = provider
        .fetch_price("NOPE", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::SymbolNotFound(s) if s == "NOPE"));
}

#[tokio::test]
async fn test_fetch_price_cancelled() {
    let index = CoinIndex::from_pairs([("BTC", "btc-bitcoin")]);
    let provider = CoinPaprikaProvider::new("http://127.0.0.1:9", index, fast_limiter());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = provider.fetch_price("BTC", &cancel).await.unwrap_err();
    assert!(matches!(err, MarketDataError::Cancelled));
}
