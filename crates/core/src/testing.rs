//! In-memory trait implementations shared by the unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::currencies::{Currency, CurrencyError, CurrencyRepositoryTrait, PageRequest};
use crate::errors::DatabaseError;
use crate::price_source::{PricePoint, PriceSourceError, PriceSourceTrait};
use crate::prices::{PriceError, PriceRepositoryTrait, PriceSnapshot};
use crate::{Error, Result};

// =========================================================================
// Mock CurrencyRepository
// =========================================================================

#[derive(Clone, Default)]
pub struct MockCurrencyRepository {
    currencies: Arc<Mutex<Vec<Currency>>>,
    failing_lists: Arc<AtomicU32>,
    list_calls: Arc<AtomicU32>,
}

impl MockCurrencyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-filled in the given order, one second apart.
    pub fn with_symbols(symbols: &[&str]) -> Self {
        let repo = Self::new();
        let base = Utc::now() - ChronoDuration::hours(1);
        for (i, symbol) in symbols.iter().enumerate() {
            let mut currency = Currency::new(symbol).unwrap();
            currency.created_at = base + ChronoDuration::seconds(i as i64);
            currency.updated_at = currency.created_at;
            repo.currencies.lock().unwrap().push(currency);
        }
        repo
    }

    /// Makes the next `n` listings fail. `u32::MAX` fails forever.
    pub fn fail_lists(&self, n: u32) {
        self.failing_lists.store(n, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get(&self, symbol: &str) -> Option<Currency> {
        self.currencies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.symbol == symbol)
            .cloned()
    }
}

#[async_trait]
impl CurrencyRepositoryTrait for MockCurrencyRepository {
    async fn add_currency(&self, currency: Currency) -> Result<Currency> {
        let mut currencies = self.currencies.lock().unwrap();
        if currencies.iter().any(|c| c.symbol == currency.symbol) {
            return Err(CurrencyError::DuplicateCurrency(currency.symbol).into());
        }
        currencies.push(currency.clone());
        Ok(currency)
    }

    async fn remove_currency(&self, symbol: &str) -> Result<()> {
        let mut currencies = self.currencies.lock().unwrap();
        let before = currencies.len();
        currencies.retain(|c| c.symbol != symbol);
        if currencies.len() == before {
            return Err(CurrencyError::NotTracked(symbol.to_string()).into());
        }
        Ok(())
    }

    fn get_by_symbol(&self, symbol: &str) -> Result<Option<Currency>> {
        Ok(self.get(symbol))
    }

    fn list_currencies(&self, page: PageRequest) -> Result<Vec<Currency>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.failing_lists.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != u32::MAX {
                self.failing_lists.store(remaining - 1, Ordering::SeqCst);
            }
            return Err(DatabaseError::QueryFailed("connection reset".into()).into());
        }

        let mut currencies = self.currencies.lock().unwrap().clone();
        currencies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(currencies
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }
}

// =========================================================================
// Mock PriceRepository
// =========================================================================

#[derive(Clone, Default)]
pub struct MockPriceRepository {
    snapshots: Arc<Mutex<Vec<PriceSnapshot>>>,
    fail_on_save: Arc<Mutex<bool>>,
}

impl MockPriceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on_save(&self, fail: bool) {
        *self.fail_on_save.lock().unwrap() = fail;
    }

    pub fn insert(&self, snapshot: PriceSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot);
    }

    pub fn all(&self) -> Vec<PriceSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }

    fn for_currency(&self, currency_id: &str) -> Vec<PriceSnapshot> {
        self.snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.currency_id == currency_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PriceRepositoryTrait for MockPriceRepository {
    async fn save_price_snapshot(&self, snapshot: PriceSnapshot) -> Result<PriceSnapshot> {
        if *self.fail_on_save.lock().unwrap() {
            return Err(Error::Unexpected("Intentional save failure".into()));
        }
        let mut snapshots = self.snapshots.lock().unwrap();
        if snapshots
            .iter()
            .any(|s| s.currency_id == snapshot.currency_id && s.timestamp == snapshot.timestamp)
        {
            return Err(PriceError::DuplicatePrice {
                currency_id: snapshot.currency_id,
                timestamp: snapshot.timestamp,
            }
            .into());
        }
        snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    fn get_exact(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>> {
        Ok(self
            .for_currency(currency_id)
            .into_iter()
            .find(|s| s.timestamp == timestamp))
    }

    fn get_closest_before(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>> {
        Ok(self
            .for_currency(currency_id)
            .into_iter()
            .filter(|s| s.timestamp < timestamp)
            .max_by_key(|s| s.timestamp))
    }

    fn get_closest_after(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>> {
        Ok(self
            .for_currency(currency_id)
            .into_iter()
            .filter(|s| s.timestamp > timestamp)
            .min_by_key(|s| s.timestamp))
    }

    fn list_price_snapshots(
        &self,
        currency_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceSnapshot>> {
        let mut snapshots: Vec<_> = self
            .for_currency(currency_id)
            .into_iter()
            .filter(|s| s.timestamp >= start && s.timestamp <= end)
            .collect();
        snapshots.sort_by_key(|s| s.timestamp);
        Ok(snapshots)
    }
}

// =========================================================================
// Mock PriceSource
// =========================================================================

/// Fixed prices per symbol. Each fetch is stamped one minute after the
/// previous one so repeated cycles never collide on a timestamp.
#[derive(Clone)]
pub struct MockPriceSource {
    prices: Arc<HashMap<String, f64>>,
    failing: Arc<Mutex<HashSet<String>>>,
    clock: Arc<AtomicI64>,
}

impl MockPriceSource {
    pub fn with_prices(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: Arc::new(
                prices
                    .iter()
                    .map(|(symbol, price)| (symbol.to_string(), *price))
                    .collect(),
            ),
            failing: Arc::default(),
            clock: Arc::new(AtomicI64::new(1_700_000_000)),
        }
    }

    pub fn fail_symbol(&self, symbol: &str) {
        self.failing.lock().unwrap().insert(symbol.to_string());
    }
}

#[async_trait]
impl PriceSourceTrait for MockPriceSource {
    async fn symbol_exists(&self, symbol: &str) -> Result<bool> {
        Ok(self.prices.contains_key(symbol))
    }

    async fn fetch_price(&self, symbol: &str, cancel: &CancellationToken) -> Result<PricePoint> {
        if cancel.is_cancelled() {
            return Err(PriceSourceError::Cancelled.into());
        }
        if self.failing.lock().unwrap().contains(symbol) {
            return Err(PriceSourceError::Network(format!("{symbol}: connection refused")).into());
        }
        let price = *self
            .prices
            .get(symbol)
            .ok_or_else(|| PriceSourceError::UnknownSymbol(symbol.to_string()))?;
        let timestamp = self.clock.fetch_add(60, Ordering::SeqCst);
        Ok(PricePoint::new(symbol, price, timestamp))
    }
}
