use serde::Serialize;
use std::time::Duration;

/// Step of the per-symbol pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureStage {
    Fetch,
    Validate,
    Save,
}

/// A symbol skipped during a cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolFailure {
    pub symbol: String,
    pub stage: FailureStage,
    pub reason: String,
}

/// Counters for one successful pass over the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    /// Currencies returned by the listing.
    pub listed: usize,
    /// Snapshots persisted.
    pub saved: usize,
    pub failures: Vec<SymbolFailure>,
}

impl CycleReport {
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}

/// How a cycle ended after retries.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleStatus {
    Completed(CycleReport),
    /// Every attempt failed at the listing step.
    GaveUp { last_error: String },
    Cancelled,
}

/// Result of [`IngestionService::run_with_retry`](super::IngestionService::run_with_retry).
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    pub status: CycleStatus,
    pub attempts: u32,
    /// Backoff waits started between attempts, in order.
    pub backoffs: Vec<Duration>,
}
