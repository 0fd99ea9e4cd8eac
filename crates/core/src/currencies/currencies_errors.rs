use thiserror::Error;

/// Symbol registry failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Malformed symbol, or one the price source cannot resolve.
    #[error("invalid cryptocurrency symbol: {0}")]
    InvalidSymbol(String),

    #[error("cryptocurrency already tracked: {0}")]
    DuplicateCurrency(String),

    #[error("cryptocurrency not tracked: {0}")]
    NotTracked(String),
}
