use chrono::{DateTime, Utc};
use thiserror::Error;

/// Price history failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("price must be a finite non-negative number, got {0}")]
    NegativePrice(f64),

    #[error("timestamp cannot be in the future: {0}")]
    TimestampFuture(DateTime<Utc>),

    /// A snapshot for this currency and second already exists.
    #[error("price already exists for currency {currency_id} at {timestamp}")]
    DuplicatePrice {
        currency_id: String,
        timestamp: DateTime<Utc>,
    },

    /// No snapshot at, before or after the requested time.
    #[error("price not found for {0}")]
    PriceNotFound(String),
}
