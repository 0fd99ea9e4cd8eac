use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use pricewatch_market_data::MarketDataProvider;

use super::{PricePoint, PriceSourceTrait};
use crate::Result;

/// Adapts a market-data provider to the core price source contract.
pub struct MarketDataPriceSource {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataPriceSource {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }
}

#[async_trait]
impl PriceSourceTrait for MarketDataPriceSource {
    async fn symbol_exists(&self, symbol: &str) -> Result<bool> {
        Ok(self.provider.symbol_exists(symbol).await?)
    }

    async fn fetch_price(&self, symbol: &str, cancel: &CancellationToken) -> Result<PricePoint> {
        self.provider
            .fetch_price(symbol, cancel)
            .await
            .map_err(|e| {
                if !matches!(e, pricewatch_market_data::MarketDataError::Cancelled) {
                    debug!(
                        "{} fetch for {} failed (transient: {}): {}",
                        self.provider.id(),
                        symbol,
                        e.is_transient(),
                        e
                    );
                }
                e.into()
            })
    }
}
