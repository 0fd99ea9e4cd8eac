//! Pricewatch Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the crypto price tracker:
//! the symbol registry, the price history lookup policy and the scheduled
//! ingestion loop. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod currencies;
pub mod errors;
pub mod ingestion;
pub mod price_source;
pub mod prices;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

#[cfg(test)]
pub(crate) mod testing;
