use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{select_nearest, truncate_to_seconds, PriceError, PriceQueryResult, PriceSnapshot};
use crate::currencies::Currency;
use crate::Result;

/// Append-only store of price snapshots.
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    /// Inserts a snapshot. A second snapshot for the same currency and
    /// timestamp fails with `DuplicatePrice`; nothing is overwritten.
    async fn save_price_snapshot(&self, snapshot: PriceSnapshot) -> Result<PriceSnapshot>;

    fn get_exact(&self, currency_id: &str, timestamp: DateTime<Utc>)
        -> Result<Option<PriceSnapshot>>;

    /// Latest snapshot strictly before `timestamp`.
    fn get_closest_before(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>>;

    /// Earliest snapshot strictly after `timestamp`.
    fn get_closest_after(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>>;

    /// Snapshots with `start <= timestamp <= end`, oldest first.
    fn list_price_snapshots(
        &self,
        currency_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceSnapshot>>;

    /// Exact match on the truncated target, otherwise the nearest neighbour.
    fn get_price_snapshot(
        &self,
        currency: &Currency,
        target: DateTime<Utc>,
    ) -> Result<PriceSnapshot> {
        let target = truncate_to_seconds(target);

        if let Some(exact) = self.get_exact(&currency.id, target)? {
            return Ok(exact);
        }

        let prior = self.get_closest_before(&currency.id, target)?;
        let subsequent = self.get_closest_after(&currency.id, target)?;

        select_nearest(target, prior, subsequent)
            .ok_or_else(|| PriceError::PriceNotFound(currency.symbol.clone()).into())
    }
}

/// Price history operations exposed to the API layer.
pub trait PriceServiceTrait: Send + Sync {
    /// Snapshot closest to `at` for a tracked symbol.
    fn get_price(&self, symbol: &str, at: DateTime<Utc>) -> Result<PriceQueryResult>;

    /// Snapshots in `[start, end]`, oldest first.
    fn get_price_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceSnapshot>>;
}
