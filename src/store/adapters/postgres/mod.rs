//! `PostgreSQL` adapter for the record store.

mod models;
mod schema;
mod store;
mod transaction;

pub use store::{PostgresRecordStore, StorePgPool};
