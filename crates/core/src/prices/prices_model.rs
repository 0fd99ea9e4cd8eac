//! Price snapshot domain models.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PriceError;
use crate::Result;

/// One observed USD price of a currency at a whole second.
///
/// Snapshots are immutable once stored; at most one exists per
/// `(currency_id, timestamp)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub id: String,
    pub currency_id: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl PriceSnapshot {
    /// Validates and builds a snapshot. The timestamp is truncated to seconds.
    pub fn new(currency_id: &str, timestamp: DateTime<Utc>, price: f64) -> Result<Self> {
        Self::new_at(currency_id, timestamp, price, Utc::now())
    }

    /// Same as [`PriceSnapshot::new`] with an explicit "now".
    pub fn new_at(
        currency_id: &str,
        timestamp: DateTime<Utc>,
        price: f64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if !price.is_finite() || price < 0.0 {
            return Err(PriceError::NegativePrice(price).into());
        }
        if timestamp > now {
            return Err(PriceError::TimestampFuture(timestamp).into());
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            currency_id: currency_id.to_string(),
            timestamp: truncate_to_seconds(timestamp),
            price,
            created_at: now,
        })
    }
}

/// Drops sub-second precision.
pub fn truncate_to_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(0)
}

/// Answer to a nearest-price query.
///
/// `returned_timestamp` is the snapshot's own time, which differs from
/// `requested_timestamp` unless the match was exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceQueryResult {
    pub symbol: String,
    pub requested_timestamp: DateTime<Utc>,
    pub returned_timestamp: DateTime<Utc>,
    pub price: f64,
}
