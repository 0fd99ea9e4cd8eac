//! Price source error types.

use thiserror::Error;

use pricewatch_market_data::errors::MarketDataError as ExternalMarketDataError;

/// Errors raised while checking or fetching prices from the external source.
///
/// This error type bridges between the market-data crate's detailed error types
/// and the core domain's error handling needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceSourceError {
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode provider response: {0}")]
    Decode(String),

    #[error("provider error: {0}")]
    Provider(String),
}

impl From<ExternalMarketDataError> for PriceSourceError {
    fn from(error: ExternalMarketDataError) -> Self {
        match error {
            ExternalMarketDataError::SymbolNotFound(symbol) => {
                PriceSourceError::UnknownSymbol(symbol)
            }
            ExternalMarketDataError::RateLimited { provider } => {
                PriceSourceError::RateLimited(provider)
            }
            ExternalMarketDataError::Cancelled => PriceSourceError::Cancelled,
            ExternalMarketDataError::Timeout { provider } => {
                PriceSourceError::Network(format!("{} timed out", provider))
            }
            ExternalMarketDataError::ProviderError { provider, message } => {
                PriceSourceError::Provider(format!("{}: {}", provider, message))
            }
            ExternalMarketDataError::InvalidResponse { provider, message } => {
                PriceSourceError::Decode(format!("{}: {}", provider, message))
            }
            ExternalMarketDataError::ValidationFailed { message } => {
                PriceSourceError::Provider(message)
            }
            ExternalMarketDataError::Network(e) => PriceSourceError::Network(e.to_string()),
        }
    }
}

impl From<ExternalMarketDataError> for crate::Error {
    fn from(error: ExternalMarketDataError) -> Self {
        crate::Error::PriceSource(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_provider_errors() {
        assert_eq!(
            PriceSourceError::from(ExternalMarketDataError::Cancelled),
            PriceSourceError::Cancelled
        );
        assert_eq!(
            PriceSourceError::from(ExternalMarketDataError::SymbolNotFound("XYZ".into())),
            PriceSourceError::UnknownSymbol("XYZ".into())
        );
        assert_eq!(
            PriceSourceError::from(ExternalMarketDataError::InvalidResponse {
                provider: "COINPAPRIKA".into(),
                message: "no USD quote for BTC".into(),
            }),
            PriceSourceError::Decode("COINPAPRIKA: no USD quote for BTC".into())
        );
    }

    #[test]
    fn test_cancelled_provider_error_is_cancelled_core_error() {
        let err: crate::Error = ExternalMarketDataError::Cancelled.into();
        assert!(err.is_cancelled());
    }
}
