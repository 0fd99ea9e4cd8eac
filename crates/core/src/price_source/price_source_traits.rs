use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::PricePoint;
use crate::Result;

/// External price capability consumed by the registry and the ingestion cycle.
///
/// Any implementation (a different provider, a stub) can be swapped in
/// without touching the core.
#[async_trait]
pub trait PriceSourceTrait: Send + Sync {
    /// Whether the source can price `symbol`.
    async fn symbol_exists(&self, symbol: &str) -> Result<bool>;

    /// Current USD price. Must return promptly with a cancellation error once
    /// `cancel` fires, including while waiting for the rate limiter.
    async fn fetch_price(&self, symbol: &str, cancel: &CancellationToken) -> Result<PricePoint>;
}
