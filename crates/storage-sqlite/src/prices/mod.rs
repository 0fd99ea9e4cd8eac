//! SQLite storage implementation for the price history.

mod model;
mod repository;

pub use model::PriceSnapshotDB;
pub use repository::PriceSnapshotRepository;
