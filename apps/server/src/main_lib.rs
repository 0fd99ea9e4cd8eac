use std::sync::Arc;

use anyhow::Context;
use pricewatch_core::{
    currencies::{CurrencyService, CurrencyServiceTrait},
    ingestion::IngestionService,
    price_source::{MarketDataPriceSource, PriceSourceTrait},
    prices::{PriceService, PriceServiceTrait},
};
use pricewatch_market_data::{CoinPaprikaProvider, RateLimitConfig, RateLimiter};
use pricewatch_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, CurrencyRepository, PriceSnapshotRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub currency_service: Arc<dyn CurrencyServiceTrait + Send + Sync>,
    pub price_service: Arc<dyn PriceServiceTrait + Send + Sync>,
    pub ingestion_service: Arc<IngestionService>,
}

pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wires the CoinPaprika provider in front of [`build_state_with_source`].
///
/// The coin index is loaded here, once; a failure aborts start-up.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let limiter = RateLimiter::new(RateLimitConfig::per_second(config.rate_limit_per_sec))
        .context("invalid rate limit")?;
    let provider = CoinPaprikaProvider::connect(&config.coinpaprika_url, Arc::new(limiter))
        .await
        .context("failed to load the CoinPaprika coin index")?;
    let price_source = Arc::new(MarketDataPriceSource::new(Arc::new(provider)));
    tracing::info!("Price source: {}", price_source.provider_id());

    build_state_with_source(config, price_source).await
}

/// Opens the database and assembles the services around `price_source`.
pub async fn build_state_with_source(
    config: &Config,
    price_source: Arc<dyn PriceSourceTrait>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let currency_repository = Arc::new(CurrencyRepository::new(pool.clone(), writer.clone()));
    let price_repository = Arc::new(PriceSnapshotRepository::new(pool.clone(), writer.clone()));

    let currency_service = Arc::new(CurrencyService::new(
        currency_repository.clone(),
        price_source.clone(),
    ));
    let price_service = Arc::new(PriceService::new(
        currency_repository.clone(),
        price_repository.clone(),
    ));
    let ingestion_service = Arc::new(IngestionService::new(
        currency_repository,
        price_repository,
        price_source,
    ));

    Ok(Arc::new(AppState {
        currency_service,
        price_service,
        ingestion_service,
    }))
}
