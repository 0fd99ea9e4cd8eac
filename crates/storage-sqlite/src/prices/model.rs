//! Database models for price snapshots.

use chrono::{DateTime, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pricewatch_core::errors::DatabaseError;
use pricewatch_core::prices::PriceSnapshot;
use pricewatch_core::Error;

/// Snapshot row. `timestamp` holds Unix seconds so range scans stay numeric.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::price_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshotDB {
    pub id: String,
    pub currency_id: String,
    pub timestamp: i64,
    pub price: f64,
    pub created_at: NaiveDateTime,
}

impl TryFrom<PriceSnapshotDB> for PriceSnapshot {
    type Error = Error;

    fn try_from(db: PriceSnapshotDB) -> Result<Self, Self::Error> {
        let timestamp = DateTime::from_timestamp(db.timestamp, 0).ok_or_else(|| {
            DatabaseError::Internal(format!(
                "snapshot {} has out-of-range timestamp {}",
                db.id, db.timestamp
            ))
        })?;
        Ok(Self {
            id: db.id,
            currency_id: db.currency_id,
            timestamp,
            price: db.price,
            created_at: db.created_at.and_utc(),
        })
    }
}

impl From<PriceSnapshot> for PriceSnapshotDB {
    fn from(domain: PriceSnapshot) -> Self {
        Self {
            id: domain.id,
            currency_id: domain.currency_id,
            timestamp: domain.timestamp.timestamp(),
            price: domain.price,
            created_at: domain.created_at.naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(timestamp: i64) -> PriceSnapshotDB {
        PriceSnapshotDB {
            id: "snap".to_string(),
            currency_id: "cur".to_string(),
            timestamp,
            price: 42.0,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn test_row_converts_to_snapshot() {
        let snapshot = PriceSnapshot::try_from(row(1_700_000_000)).unwrap();
        assert_eq!(snapshot.timestamp.timestamp(), 1_700_000_000);
        assert_eq!(snapshot.price, 42.0);
    }

    #[test]
    fn test_out_of_range_timestamp_is_an_error() {
        let err = PriceSnapshot::try_from(row(i64::MAX)).unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::Internal(_))));
    }
}
