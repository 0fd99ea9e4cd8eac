use serde::{Deserialize, Serialize};

/// A single USD price observation returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Uppercase ticker the price belongs to.
    pub symbol: String,
    /// Price in USD.
    pub price: f64,
    /// Unix seconds at which the price was fetched.
    pub timestamp: i64,
}

impl PricePoint {
    pub fn new(symbol: impl Into<String>, price: f64, timestamp: i64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            timestamp,
        }
    }
}
