use chrono::DateTime;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::{CycleOutcome, CycleReport, CycleStatus, FailureStage, RetryPolicy, SymbolFailure};
use crate::constants::INGESTION_PAGE_SIZE;
use crate::currencies::{Currency, CurrencyRepositoryTrait, PageRequest};
use crate::errors::ValidationError;
use crate::price_source::{PriceSourceError, PriceSourceTrait};
use crate::prices::{PriceError, PriceRepositoryTrait, PriceSnapshot};
use crate::{Error, Result};

/// Fetches a fresh price for every tracked currency and appends it to the history.
pub struct IngestionService {
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    price_repository: Arc<dyn PriceRepositoryTrait>,
    price_source: Arc<dyn PriceSourceTrait>,
    page_size: i64,
}

impl IngestionService {
    pub fn new(
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
        price_repository: Arc<dyn PriceRepositoryTrait>,
        price_source: Arc<dyn PriceSourceTrait>,
    ) -> Self {
        Self {
            currency_repository,
            price_repository,
            price_source,
            page_size: INGESTION_PAGE_SIZE,
        }
    }

    /// One pass over the registry.
    ///
    /// Pages through the currencies until an empty page and processes them one
    /// by one. Per-symbol failures end up in the report; only a listing failure
    /// or cancellation fails the cycle.
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> Result<CycleReport> {
        let mut report = CycleReport::default();
        let mut page = PageRequest::new(self.page_size, 0)?;

        loop {
            if cancel.is_cancelled() {
                return Err(PriceSourceError::Cancelled.into());
            }

            let currencies = self.currency_repository.list_currencies(page)?;
            if currencies.is_empty() {
                break;
            }

            for currency in &currencies {
                report.listed += 1;
                match self.ingest_currency(currency, cancel).await {
                    Ok(snapshot) => {
                        report.saved += 1;
                        debug!(
                            "Saved {} price {} at {}",
                            currency.symbol, snapshot.price, snapshot.timestamp
                        );
                    }
                    Err((_, err)) if err.is_cancelled() => return Err(err),
                    Err((stage, err)) => {
                        log_symbol_failure(&currency.symbol, stage, &err);
                        report.failures.push(SymbolFailure {
                            symbol: currency.symbol.clone(),
                            stage,
                            reason: err.to_string(),
                        });
                    }
                }
            }

            page = page.next();
        }

        Ok(report)
    }

    /// Runs [`run_cycle`](Self::run_cycle) until it succeeds, the retry budget
    /// is spent or `cancel` fires.
    pub async fn run_with_retry(
        &self,
        policy: &RetryPolicy,
        cancel: &CancellationToken,
    ) -> CycleOutcome {
        let mut backoffs = Vec::new();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let err = match self.run_cycle(cancel).await {
                Ok(report) => {
                    info!(
                        "Ingestion cycle succeeded: {} listed, {} saved, {} skipped",
                        report.listed,
                        report.saved,
                        report.skipped()
                    );
                    return CycleOutcome {
                        status: CycleStatus::Completed(report),
                        attempts: attempt,
                        backoffs,
                    };
                }
                Err(err) if err.is_cancelled() => {
                    info!("Ingestion cycle cancelled");
                    return cancelled(attempt, backoffs);
                }
                Err(err) => err,
            };

            error!(
                "Ingestion cycle attempt {}/{} failed: {}",
                attempt, policy.max_attempts, err
            );

            let Some(wait) = policy.backoff_after(attempt) else {
                warn!(
                    "Ingestion cycle giving up after {} attempts; waiting for next run",
                    attempt
                );
                return CycleOutcome {
                    status: CycleStatus::GaveUp {
                        last_error: err.to_string(),
                    },
                    attempts: attempt,
                    backoffs,
                };
            };

            backoffs.push(wait);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Shutdown during ingestion backoff");
                    return cancelled(attempt, backoffs);
                }
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    async fn ingest_currency(
        &self,
        currency: &Currency,
        cancel: &CancellationToken,
    ) -> std::result::Result<PriceSnapshot, (FailureStage, Error)> {
        let point = self
            .price_source
            .fetch_price(&currency.symbol, cancel)
            .await
            .map_err(|e| (FailureStage::Fetch, e))?;

        let timestamp = DateTime::from_timestamp(point.timestamp, 0).ok_or_else(|| {
            let err = ValidationError::InvalidInput(format!(
                "timestamp {} out of range",
                point.timestamp
            ));
            (FailureStage::Validate, Error::from(err))
        })?;

        let snapshot = PriceSnapshot::new(&currency.id, timestamp, point.price)
            .map_err(|e| (FailureStage::Validate, e))?;

        self.price_repository
            .save_price_snapshot(snapshot)
            .await
            .map_err(|e| (FailureStage::Save, e))
    }
}

fn cancelled(attempts: u32, backoffs: Vec<std::time::Duration>) -> CycleOutcome {
    CycleOutcome {
        status: CycleStatus::Cancelled,
        attempts,
        backoffs,
    }
}

fn log_symbol_failure(symbol: &str, stage: FailureStage, err: &Error) {
    match (stage, err) {
        (_, Error::Price(PriceError::DuplicatePrice { .. })) => {
            warn!("Skipping {}: {}", symbol, err)
        }
        (FailureStage::Fetch, _) => error!("Fetch price failed for {}: {}", symbol, err),
        (FailureStage::Validate, _) => error!("Invalid price snapshot for {}: {}", symbol, err),
        (FailureStage::Save, _) => error!("Save snapshot failed for {}: {}", symbol, err),
    }
}

#[cfg(test)]
impl IngestionService {
    pub(crate) fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }
}
