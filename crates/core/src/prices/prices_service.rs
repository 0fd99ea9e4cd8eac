use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use super::{PriceQueryResult, PriceRepositoryTrait, PriceServiceTrait, PriceSnapshot};
use crate::currencies::{normalize_symbol, Currency, CurrencyError, CurrencyRepositoryTrait};
use crate::errors::ValidationError;
use crate::Result;

/// Read side of the price history.
pub struct PriceService {
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    price_repository: Arc<dyn PriceRepositoryTrait>,
}

impl PriceService {
    pub fn new(
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
        price_repository: Arc<dyn PriceRepositoryTrait>,
    ) -> Self {
        Self {
            currency_repository,
            price_repository,
        }
    }

    /// Unknown symbols are `NotTracked`, never `PriceNotFound`.
    fn tracked_currency(&self, symbol: &str) -> Result<Currency> {
        let symbol = normalize_symbol(symbol)?;
        self.currency_repository
            .get_by_symbol(&symbol)?
            .ok_or_else(|| CurrencyError::NotTracked(symbol).into())
    }
}

impl PriceServiceTrait for PriceService {
    fn get_price(&self, symbol: &str, at: DateTime<Utc>) -> Result<PriceQueryResult> {
        let currency = self.tracked_currency(symbol)?;
        let snapshot = self.price_repository.get_price_snapshot(&currency, at)?;

        debug!(
            "Price query {} at {} resolved to {}",
            currency.symbol, at, snapshot.timestamp
        );

        Ok(PriceQueryResult {
            symbol: currency.symbol,
            requested_timestamp: at,
            returned_timestamp: snapshot.timestamp,
            price: snapshot.price,
        })
    }

    fn get_price_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceSnapshot>> {
        if start > end {
            return Err(ValidationError::InvalidInput(format!(
                "start {} is after end {}",
                start, end
            ))
            .into());
        }
        let currency = self.tracked_currency(symbol)?;
        self.price_repository
            .list_price_snapshots(&currency.id, start, end)
    }
}
