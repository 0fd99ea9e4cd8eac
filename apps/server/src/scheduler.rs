//! Background price ingestion for the server.

use std::sync::Arc;

use pricewatch_core::ingestion::{PriceScheduler, RetryPolicy, SchedulerConfig};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::main_lib::AppState;

pub fn scheduler_config(config: &Config) -> SchedulerConfig {
    SchedulerConfig {
        interval: config.fetch_interval,
        retry: RetryPolicy::new(config.retry_max_attempts, config.retry_base),
    }
}

/// Starts the ingestion loop. It stops once `shutdown` is cancelled and the
/// handle resolves to the number of cycles it started.
pub fn start_price_scheduler(
    state: &Arc<AppState>,
    config: &Config,
    shutdown: CancellationToken,
) -> JoinHandle<u64> {
    PriceScheduler::new(state.ingestion_service.clone(), scheduler_config(config)).spawn(shutdown)
}
