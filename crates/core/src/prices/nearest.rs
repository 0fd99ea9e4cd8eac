//! Nearest-timestamp selection policy.

use chrono::{DateTime, Utc};

use super::PriceSnapshot;

/// Picks the snapshot closest to `target` from its two neighbours.
///
/// `prior` must be the latest snapshot strictly before `target` and
/// `subsequent` the earliest strictly after it. On equal distance the older
/// snapshot wins. Returns `None` only when both are absent.
pub fn select_nearest(
    target: DateTime<Utc>,
    prior: Option<PriceSnapshot>,
    subsequent: Option<PriceSnapshot>,
) -> Option<PriceSnapshot> {
    match (prior, subsequent) {
        (Some(older), Some(newer)) => {
            let before = target - older.timestamp;
            let after = newer.timestamp - target;
            if before <= after {
                Some(older)
            } else {
                Some(newer)
            }
        }
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}
