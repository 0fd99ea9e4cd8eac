//! CoinPaprika provider for crypto spot prices.
//!
//! CoinPaprika addresses coins by its own ids (`btc-bitcoin`), not by ticker.
//! The provider therefore needs a [`CoinIndex`] mapping uppercase tickers to
//! those ids. The index is loaded once from `/v1/coins` when the provider is
//! built and never refreshed while the process runs.
//!
//! Endpoints used:
//! - `GET {base}/v1/coins` for the index
//! - `GET {base}/v1/tickers/{id}` for the current USD quote
//!
//! The free tier needs no API key.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::MarketDataError;
use crate::models::PricePoint;
use crate::provider::MarketDataProvider;
use crate::rate_limiter::RateLimiter;

/// Provider ID constant
const PROVIDER_ID: &str = "COINPAPRIKA";

/// Public API root.
pub const DEFAULT_BASE_URL: &str = "https://api.coinpaprika.com";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Entry of the `/v1/coins` listing. Tokens and inactive coins are skipped.
#[derive(Debug, Deserialize)]
struct CoinEntry {
    id: String,
    symbol: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    is_active: bool,
}

/// Subset of the `/v1/tickers/{id}` response we care about.
#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(default)]
    quotes: HashMap<String, TickerQuote>,
}

#[derive(Debug, Deserialize)]
struct TickerQuote {
    price: f64,
}

/// Uppercase ticker to CoinPaprika coin id.
#[derive(Debug, Clone, Default)]
pub struct CoinIndex {
    ids: HashMap<String, String>,
}

impl CoinIndex {
    /// Build an index from `(symbol, coin_id)` pairs. The first pair for a symbol wins.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let mut ids = HashMap::new();
        for (symbol, id) in pairs {
            ids.entry(symbol.as_ref().to_uppercase())
                .or_insert_with(|| id.into());
        }
        Self { ids }
    }

    fn from_entries(entries: Vec<CoinEntry>) -> Self {
        Self::from_pairs(
            entries
                .into_iter()
                .filter(|coin| coin.kind == "coin" && coin.is_active)
                .map(|coin| (coin.symbol, coin.id)),
        )
    }

    /// Coin id for a ticker, case-insensitive.
    pub fn coin_id(&self, symbol: &str) -> Option<&str> {
        self.ids.get(&symbol.to_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// CoinPaprika price provider.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use pricewatch_market_data::{CoinPaprikaProvider, RateLimitConfig, RateLimiter};
///
/// let limiter = Arc::new(RateLimiter::new(RateLimitConfig::per_second(1.0))?);
/// let provider = CoinPaprikaProvider::connect("https://api.coinpaprika.com", limiter).await?;
/// ```
pub struct CoinPaprikaProvider {
    client: Client,
    base_url: String,
    index: CoinIndex,
    limiter: Arc<RateLimiter>,
}

impl CoinPaprikaProvider {
    /// Create a provider around an already loaded index.
    pub fn new(base_url: &str, index: CoinIndex, limiter: Arc<RateLimiter>) -> Self {
        Self {
            client: build_client(),
            base_url: normalize_base_url(base_url),
            index,
            limiter,
        }
    }

    /// Load the coin index from the API and create the provider.
    pub async fn connect(
        base_url: &str,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, MarketDataError> {
        let client = build_client();
        let base_url = normalize_base_url(base_url);
        let index = load_coin_index(&client, &base_url).await?;

        Ok(Self {
            client,
            base_url,
            index,
            limiter,
        })
    }

    pub fn index(&self) -> &CoinIndex {
        &self.index
    }

    async fn fetch_ticker(&self, coin_id: &str) -> Result<TickerResponse, MarketDataError> {
        let url = format!("{}/v1/tickers/{}", self.base_url, coin_id);
        get_json(&self.client, &url).await
    }
}

#[async_trait]
impl MarketDataProvider for CoinPaprikaProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn symbol_exists(&self, symbol: &str) -> Result<bool, MarketDataError> {
        Ok(self.index.coin_id(symbol).is_some())
    }

    async fn fetch_price(
        &self,
        symbol: &str,
        cancel: &CancellationToken,
    ) -> Result<PricePoint, MarketDataError> {
        let coin_id = self
            .index
            .coin_id(symbol)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?
            .to_string();

        self.limiter.acquire(cancel).await?;

        debug!("Fetching {} ticker for {}", PROVIDER_ID, coin_id);
        let ticker = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(MarketDataError::Cancelled),
            result = self.fetch_ticker(&coin_id) => result?,
        };

        let usd = ticker
            .quotes
            .get("USD")
            .ok_or_else(|| MarketDataError::InvalidResponse {
                provider: PROVIDER_ID.to_string(),
                message: format!("no USD quote for {}", symbol),
            })?;

        Ok(PricePoint::new(
            symbol.to_uppercase(),
            usd.price,
            Utc::now().timestamp(),
        ))
    }
}

/// Fetch `/v1/coins` and keep active coins only.
pub async fn load_coin_index(client: &Client, base_url: &str) -> Result<CoinIndex, MarketDataError> {
    let url = format!("{}/v1/coins", base_url);
    let entries: Vec<CoinEntry> = get_json(client, &url).await?;
    let index = CoinIndex::from_entries(entries);

    debug!("{} index sample: BTC -> {:?}", PROVIDER_ID, index.coin_id("BTC"));
    info!("{} coin index loaded with {} symbols", PROVIDER_ID, index.len());
    Ok(index)
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, MarketDataError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::Network(e)
        }
    })?;

    match response.status() {
        StatusCode::OK => {}
        StatusCode::TOO_MANY_REQUESTS => {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            })
        }
        status => {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("unexpected status {}", status.as_u16()),
            })
        }
    }

    response
        .json::<T>()
        .await
        .map_err(|e| MarketDataError::InvalidResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
}

fn build_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests;
