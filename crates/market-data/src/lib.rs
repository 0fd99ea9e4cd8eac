//! Pricewatch Market Data Crate
//!
//! This crate talks to external crypto price providers on behalf of the
//! Pricewatch tracker.
//!
//! # Overview
//!
//! The market data crate supports:
//! - A provider-agnostic [`MarketDataProvider`] trait
//! - A CoinPaprika implementation backed by a start-up coin index
//! - A shared, cancellable token-bucket [`RateLimiter`]
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Price source    | --> |   RateLimiter    |  (burst 1, shared)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (CoinPaprika)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   PricePoint     |  (USD price at fetch time)
//!                          +------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;
pub mod rate_limiter;

pub use errors::MarketDataError;
pub use models::PricePoint;
pub use provider::coinpaprika::{CoinIndex, CoinPaprikaProvider};
pub use provider::MarketDataProvider;
pub use rate_limiter::{RateLimitConfig, RateLimiter};

// Re-exported so callers share the same token type as the provider trait.
pub use tokio_util::sync::CancellationToken;
