use log::{debug, info};
use std::sync::Arc;

use super::{
    normalize_symbol, Currency, CurrencyError, CurrencyRepositoryTrait, CurrencyServiceTrait,
    PageRequest,
};
use crate::price_source::PriceSourceTrait;
use crate::Result;

/// Service for managing the set of tracked currencies.
pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepositoryTrait>,
    price_source: Arc<dyn PriceSourceTrait>,
}

impl CurrencyService {
    pub fn new(
        repository: Arc<dyn CurrencyRepositoryTrait>,
        price_source: Arc<dyn PriceSourceTrait>,
    ) -> Self {
        Self {
            repository,
            price_source,
        }
    }
}

#[async_trait::async_trait]
impl CurrencyServiceTrait for CurrencyService {
    /// Validates the symbol, confirms the price source can price it, then stores it.
    async fn add_currency(&self, symbol: &str) -> Result<Currency> {
        let currency = Currency::new(symbol)?;

        if !self.price_source.symbol_exists(&currency.symbol).await? {
            debug!("Price source does not know symbol {}", currency.symbol);
            return Err(CurrencyError::InvalidSymbol(currency.symbol).into());
        }

        let created = self.repository.add_currency(currency).await?;
        info!("Now tracking {} ({})", created.symbol, created.id);
        Ok(created)
    }

    async fn remove_currency(&self, symbol: &str) -> Result<()> {
        let symbol = normalize_symbol(symbol)?;
        self.repository.remove_currency(&symbol).await?;
        info!("Stopped tracking {}", symbol);
        Ok(())
    }

    fn get_currency(&self, symbol: &str) -> Result<Currency> {
        let symbol = normalize_symbol(symbol)?;
        self.repository
            .get_by_symbol(&symbol)?
            .ok_or_else(|| CurrencyError::NotTracked(symbol).into())
    }

    fn list_currencies(&self, page_size: i64, offset: i64) -> Result<Vec<Currency>> {
        let page = PageRequest::new(page_size, offset)?;
        self.repository.list_currencies(page)
    }
}
