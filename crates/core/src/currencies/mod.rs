//! Currencies module - the symbol registry: models, services, and traits.

mod currencies_errors;
mod currencies_model;
mod currencies_service;
mod currencies_traits;

#[cfg(test)]
mod currencies_model_tests;

// Re-export the public interface
pub use currencies_errors::CurrencyError;
pub use currencies_model::{normalize_symbol, Currency, PageRequest};
pub use currencies_service::CurrencyService;
pub use currencies_traits::{CurrencyRepositoryTrait, CurrencyServiceTrait};
