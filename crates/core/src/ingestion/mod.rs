//! Ingestion module - periodic fetch-and-store of prices for every tracked currency.

mod ingestion_model;
mod ingestion_service;
mod retry;
mod scheduler;


pub use ingestion_model::{CycleOutcome, CycleReport, CycleStatus, FailureStage, SymbolFailure};
pub use ingestion_service::IngestionService;
pub use retry::RetryPolicy;
pub use scheduler::{PriceScheduler, SchedulerConfig};
