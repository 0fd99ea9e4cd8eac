use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use pricewatch_core::prices::{PriceError, PriceRepositoryTrait, PriceSnapshot};
use pricewatch_core::{Error, Result};

use super::model::PriceSnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::price_snapshots;

pub struct PriceSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PriceSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PriceSnapshotRepository { pool, writer }
    }

    fn load_one<F>(&self, query: F) -> Result<Option<PriceSnapshot>>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<PriceSnapshotDB>,
    {
        let mut conn = get_connection(&self.pool)?;
        let row = query(&mut *conn).optional().into_core()?;
        row.map(PriceSnapshot::try_from).transpose()
    }
}

#[async_trait]
impl PriceRepositoryTrait for PriceSnapshotRepository {
    async fn save_price_snapshot(&self, snapshot: PriceSnapshot) -> Result<PriceSnapshot> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PriceSnapshot> {
                let key = (snapshot.currency_id.clone(), snapshot.timestamp);
                let row: PriceSnapshotDB = snapshot.into();

                let inserted = diesel::insert_into(price_snapshots::table)
                    .values(&row)
                    .returning(PriceSnapshotDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| -> Error {
                        let err = StorageError::from(e);
                        if err.is_unique_violation() {
                            PriceError::DuplicatePrice {
                                currency_id: key.0,
                                timestamp: key.1,
                            }
                            .into()
                        } else {
                            err.into()
                        }
                    })?;
                PriceSnapshot::try_from(inserted)
            })
            .await
    }

    fn get_exact(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>> {
        self.load_one(|conn| {
            price_snapshots::table
                .filter(price_snapshots::currency_id.eq(currency_id))
                .filter(price_snapshots::timestamp.eq(timestamp.timestamp()))
                .select(PriceSnapshotDB::as_select())
                .first(conn)
        })
    }

    fn get_closest_before(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>> {
        self.load_one(|conn| {
            price_snapshots::table
                .filter(price_snapshots::currency_id.eq(currency_id))
                .filter(price_snapshots::timestamp.lt(timestamp.timestamp()))
                .order(price_snapshots::timestamp.desc())
                .select(PriceSnapshotDB::as_select())
                .first(conn)
        })
    }

    fn get_closest_after(
        &self,
        currency_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PriceSnapshot>> {
        self.load_one(|conn| {
            price_snapshots::table
                .filter(price_snapshots::currency_id.eq(currency_id))
                .filter(price_snapshots::timestamp.gt(timestamp.timestamp()))
                .order(price_snapshots::timestamp.asc())
                .select(PriceSnapshotDB::as_select())
                .first(conn)
        })
    }

    fn list_price_snapshots(
        &self,
        currency_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = price_snapshots::table
            .filter(price_snapshots::currency_id.eq(currency_id))
            .filter(price_snapshots::timestamp.ge(start.timestamp()))
            .filter(price_snapshots::timestamp.le(end.timestamp()))
            .order(price_snapshots::timestamp.asc())
            .select(PriceSnapshotDB::as_select())
            .load::<PriceSnapshotDB>(&mut conn)
            .into_core()?;
        rows.into_iter().map(PriceSnapshot::try_from).collect()
    }
}
