//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while talking to a price provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider has no instrument for this symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The request could not be admitted by the rate limiter.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider whose budget was exhausted
        provider: String,
    },

    /// The caller cancelled while a request or a rate-limit wait was pending.
    #[error("Operation cancelled")]
    Cancelled,

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with an error status.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered but the payload could not be used.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that sent the payload
        provider: String,
        /// What was wrong with it
        message: String,
    },

    /// Local configuration rejected before any request is made.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether retrying the same call later could succeed.
    ///
    /// Unknown symbols and bad local configuration never heal on their own;
    /// everything that depends on the network or the provider's mood might.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::SymbolNotFound(_) | Self::ValidationFailed { .. } | Self::Cancelled => false,
            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::InvalidResponse { .. }
            | Self::Network(_) => true,
        }
    }
}
