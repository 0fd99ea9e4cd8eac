//! Data types returned by providers.

mod price_point;

pub use price_point::PricePoint;
