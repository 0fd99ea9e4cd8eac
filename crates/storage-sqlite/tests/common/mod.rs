#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use pricewatch_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, CurrencyRepository, DbPool,
    PriceSnapshotRepository, WriteHandle,
};
use tempfile::TempDir;

/// A migrated database in a temporary directory. Must be built inside a
/// Tokio runtime because the writer actor is spawned on it.
pub struct TestDb {
    pub dir: TempDir,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let (pool, writer) = open(&dir.path().join("db").join("pricewatch.db"));
        Self { dir, pool, writer }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("db").join("pricewatch.db")
    }

    pub fn currencies(&self) -> CurrencyRepository {
        CurrencyRepository::new(self.pool.clone(), self.writer.clone())
    }

    pub fn prices(&self) -> PriceSnapshotRepository {
        PriceSnapshotRepository::new(self.pool.clone(), self.writer.clone())
    }
}

pub fn open(path: &std::path::Path) -> (Arc<DbPool>, WriteHandle) {
    let path = init(path.to_str().unwrap()).unwrap();
    let pool = create_pool(&path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.as_ref().clone());
    (pool, writer)
}
