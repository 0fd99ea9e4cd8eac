//! Token bucket rate limiter shared by every provider request.
//!
//! A single bucket gates all outgoing calls. With the default burst of one
//! token, consecutive requests are spaced by `1 / rate` seconds. Waiting for a
//! token is a suspension point and observes a [`CancellationToken`].

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::MarketDataError;

/// Default refill rate: one request per second.
const DEFAULT_REQUESTS_PER_SECOND: f64 = 1.0;

/// Default bucket capacity (no bursting beyond a single request).
const DEFAULT_BUCKET_CAPACITY: f64 = 1.0;

/// Token bucket state.
#[derive(Debug)]
struct TokenBucket {
    /// Current number of available tokens.
    tokens: f64,
    /// Last time the bucket was updated.
    last_update: Instant,
    /// Token refill rate (tokens per second).
    rate: f64,
    /// Maximum bucket capacity.
    capacity: f64,
}

impl TokenBucket {
    fn with_config(config: &RateLimitConfig) -> Self {
        Self {
            tokens: config.burst_capacity,
            last_update: Instant::now(),
            rate: config.requests_per_second,
            capacity: config.burst_capacity,
        }
    }

    /// Refill tokens based on elapsed time.
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        let new_tokens = elapsed * self.rate;

        self.tokens = (self.tokens + new_tokens).min(self.capacity);
        self.last_update = now;
    }

    /// Try to acquire a token immediately.
    fn try_acquire(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Calculate the wait time until a token becomes available.
    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            let tokens_needed = 1.0 - self.tokens;
            Duration::from_secs_f64(tokens_needed / self.rate)
        }
    }
}

/// Rate limiter configuration.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Sustained requests per second. May be fractional (0.5 = one every two seconds).
    pub requests_per_second: f64,
    /// Maximum burst capacity.
    pub burst_capacity: f64,
}

impl RateLimitConfig {
    /// Configuration with the given rate and a burst of one.
    pub fn per_second(requests_per_second: f64) -> Self {
        Self {
            requests_per_second,
            burst_capacity: DEFAULT_BUCKET_CAPACITY,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::per_second(DEFAULT_REQUESTS_PER_SECOND)
    }
}

/// Shared admission gate for provider requests.
///
/// Construct one per process and hand it to providers through an `Arc`.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    /// Create a rate limiter, rejecting non-positive or non-finite settings.
    pub fn new(config: RateLimitConfig) -> Result<Self, MarketDataError> {
        if !config.requests_per_second.is_finite() || config.requests_per_second <= 0.0 {
            return Err(MarketDataError::ValidationFailed {
                message: format!(
                    "rate limit must be a positive number of requests per second, got {}",
                    config.requests_per_second
                ),
            });
        }
        if !config.burst_capacity.is_finite() || config.burst_capacity < 1.0 {
            return Err(MarketDataError::ValidationFailed {
                message: format!(
                    "burst capacity must be at least 1, got {}",
                    config.burst_capacity
                ),
            });
        }

        Ok(Self {
            bucket: Mutex::new(TokenBucket::with_config(&config)),
        })
    }

    /// Lock the bucket, recovering from poison if necessary.
    ///
    /// The worst case of a poisoned bucket is slightly wrong spacing between
    /// requests, which beats taking the whole ingestion task down.
    fn lock_bucket(&self) -> MutexGuard<'_, TokenBucket> {
        self.bucket.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter bucket mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Wait until a token is available.
    ///
    /// Returns [`MarketDataError::Cancelled`] as soon as `cancel` fires, whether
    /// or not a token would have become available.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), MarketDataError> {
        loop {
            if cancel.is_cancelled() {
                return Err(MarketDataError::Cancelled);
            }

            let wait_time = {
                let mut bucket = self.lock_bucket();
                if bucket.try_acquire() {
                    return Ok(());
                }
                bucket.time_until_available()
            };

            if wait_time > Duration::ZERO {
                debug!("Rate limiter: waiting {:?} for a token", wait_time);
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(MarketDataError::Cancelled),
                    _ = tokio::time::sleep(wait_time) => {}
                }
            }
        }
    }

    /// Try to acquire a token without waiting.
    pub fn try_acquire(&self) -> bool {
        self.lock_bucket().try_acquire()
    }

    /// Tokens currently available, after refilling.
    pub fn remaining_tokens(&self) -> f64 {
        let mut bucket = self.lock_bucket();
        bucket.refill();
        bucket.tokens
    }
}
