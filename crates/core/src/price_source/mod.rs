//! Price source module - the capability the registry and ingestion use to
//! reach an external price provider.

mod market_data_source;
mod price_source_errors;
mod price_source_traits;

pub use market_data_source::MarketDataPriceSource;
pub use price_source_errors::PriceSourceError;
pub use price_source_traits::PriceSourceTrait;

pub use pricewatch_market_data::PricePoint;
