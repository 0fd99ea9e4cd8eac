/// Number of currencies loaded per page by the ingestion cycle.
pub const INGESTION_PAGE_SIZE: i64 = 100;

/// Maximum length of a tracked symbol.
pub const MAX_SYMBOL_LEN: usize = 10;

/// Attempts per ingestion cycle before giving up on it.
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;

/// Backoff unit between cycle attempts, in milliseconds.
pub const DEFAULT_RETRY_BASE_MS: u64 = 2_000;

/// Pause between ingestion cycles, in seconds.
pub const DEFAULT_FETCH_INTERVAL_SECS: u64 = 60;
