//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Concrete provider implementations (CoinPaprika)
//!
//! Providers do their own rate limiting through an injected
//! [`RateLimiter`](crate::RateLimiter); the core system only sees the trait.

mod traits;

pub mod coinpaprika;

// Re-exports
pub use traits::MarketDataProvider;
