use async_trait::async_trait;

use super::{Currency, PageRequest};
use crate::Result;

/// Storage for the set of tracked currencies.
#[async_trait]
pub trait CurrencyRepositoryTrait: Send + Sync {
    /// Persists a new currency. A symbol already present is `DuplicateCurrency`.
    async fn add_currency(&self, currency: Currency) -> Result<Currency>;

    /// Deletes by symbol. An absent symbol is `NotTracked`.
    async fn remove_currency(&self, symbol: &str) -> Result<()>;

    fn get_by_symbol(&self, symbol: &str) -> Result<Option<Currency>>;

    /// Oldest-created first, with a stable tie-break so pages never overlap.
    fn list_currencies(&self, page: PageRequest) -> Result<Vec<Currency>>;
}

/// Symbol registry operations exposed to the API layer.
#[async_trait]
pub trait CurrencyServiceTrait: Send + Sync {
    async fn add_currency(&self, symbol: &str) -> Result<Currency>;
    async fn remove_currency(&self, symbol: &str) -> Result<()>;
    fn get_currency(&self, symbol: &str) -> Result<Currency>;
    fn list_currencies(&self, page_size: i64, offset: i64) -> Result<Vec<Currency>>;
}
