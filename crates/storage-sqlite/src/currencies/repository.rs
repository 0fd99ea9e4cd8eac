use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use pricewatch_core::currencies::{
    Currency, CurrencyError, CurrencyRepositoryTrait, PageRequest,
};
use pricewatch_core::{Error, Result};

use super::model::CurrencyDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::currencies;
use crate::schema::currencies::dsl::*;

pub struct CurrencyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CurrencyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CurrencyRepository { pool, writer }
    }
}

#[async_trait]
impl CurrencyRepositoryTrait for CurrencyRepository {
    async fn add_currency(&self, currency: Currency) -> Result<Currency> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Currency> {
                let new_symbol = currency.symbol.clone();
                let row: CurrencyDB = currency.into();

                let inserted = diesel::insert_into(currencies::table)
                    .values(&row)
                    .returning(CurrencyDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| -> Error {
                        let err = StorageError::from(e);
                        if err.is_unique_violation() {
                            CurrencyError::DuplicateCurrency(new_symbol).into()
                        } else {
                            err.into()
                        }
                    })?;
                Ok(Currency::from(inserted))
            })
            .await
    }

    async fn remove_currency(&self, target: &str) -> Result<()> {
        let target = target.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                // Snapshots go with it through ON DELETE CASCADE.
                let removed = diesel::delete(currencies.filter(symbol.eq(&target)))
                    .execute(conn)
                    .into_core()?;
                if removed == 0 {
                    return Err(CurrencyError::NotTracked(target).into());
                }
                Ok(())
            })
            .await
    }

    fn get_by_symbol(&self, target: &str) -> Result<Option<Currency>> {
        let mut conn = get_connection(&self.pool)?;
        let row = currencies
            .filter(symbol.eq(target))
            .select(CurrencyDB::as_select())
            .first::<CurrencyDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Currency::from))
    }

    fn list_currencies(&self, page: PageRequest) -> Result<Vec<Currency>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = currencies
            .order((created_at.asc(), id.asc()))
            .limit(page.limit)
            .offset(page.offset)
            .select(CurrencyDB::as_select())
            .load::<CurrencyDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Currency::from).collect())
    }
}
