//! SQLite persistence for normalized inventory movements.
//!
//! One table, `inventario`, keyed by `ID_Movimiento`, plus an `ingest_runs`
//! history. [`Store`] covers batch writes from ingestion, single-record CRUD
//! and the dashboard aggregates.

mod dashboard;
mod error;
mod query;
mod schema;
mod store;

pub use dashboard::{
    CategoryQuantity, DailyRevenue, Dashboard, DashboardFilter, FilterOptions, Kpis,
    SellerRevenue, TOP_CATEGORY_LIMIT,
};
pub use error::{Result, StoreError};
pub use schema::SCHEMA_VERSION;
pub use store::{IngestRun, ListFilter, NewIngestRun, Store, WriteMode};
