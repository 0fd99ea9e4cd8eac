//! Prices module - price history: snapshot model, nearest lookup, services, and traits.

mod nearest;
mod prices_errors;
mod prices_model;
mod prices_service;
mod prices_traits;


// Re-export the public interface
pub use nearest::select_nearest;
pub use prices_errors::PriceError;
pub use prices_model::{truncate_to_seconds, PriceQueryResult, PriceSnapshot};
pub use prices_service::PriceService;
pub use prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
