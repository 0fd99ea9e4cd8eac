//! Background scheduler for periodic price ingestion.
//!
//! Runs one cycle immediately, then one per interval. Shutdown is observed
//! before each cycle, inside it (rate-limit waits, requests, backoff) and
//! during the interval wait.

use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{CycleStatus, IngestionService, RetryPolicy};
use crate::constants::DEFAULT_FETCH_INTERVAL_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
    pub retry: RetryPolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_FETCH_INTERVAL_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

pub struct PriceScheduler {
    ingestion: Arc<IngestionService>,
    config: SchedulerConfig,
}

impl PriceScheduler {
    pub fn new(ingestion: Arc<IngestionService>, config: SchedulerConfig) -> Self {
        Self { ingestion, config }
    }

    /// Loops until `cancel` fires. Returns the number of cycles started.
    pub async fn run(&self, cancel: CancellationToken) -> u64 {
        info!(
            "Price scheduler started (interval {:?}, {} attempts per cycle)",
            self.config.interval, self.config.retry.max_attempts
        );
        let mut cycles = 0;

        loop {
            if cancel.is_cancelled() {
                info!("Price scheduler received shutdown signal, stopping");
                return cycles;
            }

            cycles += 1;
            debug!("Starting ingestion cycle #{}", cycles);
            let outcome = self
                .ingestion
                .run_with_retry(&self.config.retry, &cancel)
                .await;
            if outcome.status == CycleStatus::Cancelled {
                info!("Price scheduler stopped during cycle #{}", cycles);
                return cycles;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Price scheduler received shutdown signal during wait, stopping");
                    return cycles;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }
    }

    /// Runs the scheduler on its own task.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<u64> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCurrencyRepository, MockPriceRepository, MockPriceSource};

    fn scheduler(
        currencies: &MockCurrencyRepository,
        interval: Duration,
    ) -> (PriceScheduler, MockPriceRepository) {
        let prices = MockPriceRepository::new();
        let ingestion = IngestionService::new(
            Arc::new(currencies.clone()),
            Arc::new(prices.clone()),
            Arc::new(MockPriceSource::with_prices(&[("BTC", 64_000.0)])),
        );
        let config = SchedulerConfig {
            interval,
            retry: RetryPolicy::new(3, Duration::from_secs(2)),
        };
        (PriceScheduler::new(Arc::new(ingestion), config), prices)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_then_every_interval() {
        let currencies = MockCurrencyRepository::with_symbols(&["BTC"]);
        let (scheduler, prices) = scheduler(&currencies, Duration::from_secs(60));
        let cancel = CancellationToken::new();

        let handle = scheduler.spawn(cancel.clone());
        tokio::time::sleep(Duration::from_secs(130)).await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), 3);
        assert_eq!(prices.all().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start() {
        let currencies = MockCurrencyRepository::with_symbols(&["BTC"]);
        let (scheduler, prices) = scheduler(&currencies, Duration::from_secs(60));
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(scheduler.run(cancel).await, 0);
        assert_eq!(currencies.list_calls(), 0);
        assert!(prices.all().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_then_waits_for_next_interval() {
        let currencies = MockCurrencyRepository::with_symbols(&["BTC"]);
        currencies.fail_lists(u32::MAX);
        let (scheduler, _) = scheduler(&currencies, Duration::from_secs(60));
        let cancel = CancellationToken::new();

        let handle = scheduler.spawn(cancel.clone());
        // Cycle 1 lists at t=0, 2, 6 and gives up; cycle 2 starts at t=66 and
        // retries at t=68. The cancel lands in its second backoff.
        tokio::time::sleep(Duration::from_secs(70)).await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), 2);
        assert_eq!(currencies.list_calls(), 5);
    }
}
