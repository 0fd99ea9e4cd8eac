//! Market data provider trait definitions.
//!
//! This module defines the `MarketDataProvider` trait that all
//! price providers must implement.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::MarketDataError;
use crate::models::PricePoint;

/// Trait for crypto price providers.
///
/// Implement this trait to add support for a new price source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use pricewatch_market_data::{MarketDataError, MarketDataProvider, PricePoint};
/// use tokio_util::sync::CancellationToken;
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn symbol_exists(&self, symbol: &str) -> Result<bool, MarketDataError> {
///         Ok(symbol == "BTC")
///     }
///
///     async fn fetch_price(
///         &self,
///         symbol: &str,
///         _cancel: &CancellationToken,
///     ) -> Result<PricePoint, MarketDataError> {
///         Ok(PricePoint::new(symbol, 42.0, chrono::Utc::now().timestamp()))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINPAPRIKA".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Whether the provider can price this symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Ticker, any case
    async fn symbol_exists(&self, symbol: &str) -> Result<bool, MarketDataError>;

    /// Fetch the current USD price for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Ticker, any case
    /// * `cancel` - Aborts the rate-limit wait and the in-flight request
    ///
    /// # Returns
    ///
    /// The price stamped with the fetch time, or a `MarketDataError` on failure.
    async fn fetch_price(
        &self,
        symbol: &str,
        cancel: &CancellationToken,
    ) -> Result<PricePoint, MarketDataError>;
}
