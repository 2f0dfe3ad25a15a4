//! `PostgreSQL` record store with one database transaction per operation.

use super::{schema::CREATE_TABLES, transaction::PgStoreTransaction};
use crate::store::ports::{RecordStore, StoreError, StoreResult, StoreTransaction};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use tracing::debug;

/// `PostgreSQL` connection pool type used by the record store.
pub type StorePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed record store.
///
/// Every [`RecordStore::atomically`] call checks out one pooled connection
/// and runs the operation inside a database transaction on a blocking
/// worker thread.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: StorePgPool,
}

impl PostgresRecordStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: StorePgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the pool cannot be built.
    pub fn connect(database_url: &str, pool_size: u32) -> StoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(StoreError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the store tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the statements fail.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TABLES)
                .map_err(StoreError::persistence)?;
            debug!("record store schema is in place");
            Ok(())
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

/// Why a database transaction was rolled back.
enum Abort<E> {
    /// The caller's operation returned an error.
    Operation(E),
    /// Diesel failed to begin, commit, or roll back.
    Database(DieselError),
}

impl<E> From<DieselError> for Abort<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn atomically<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(StoreError::persistence(err)))?;
            connection
                .transaction::<T, Abort<E>, _>(|tx_conn| {
                    let mut transaction = PgStoreTransaction::new(tx_conn);
                    operation(&mut transaction).map_err(Abort::Operation)
                })
                .map_err(|abort| match abort {
                    Abort::Operation(err) => err,
                    Abort::Database(err) => E::from(StoreError::persistence(err)),
                })
        })
        .await
        .map_err(|err| E::from(StoreError::persistence(err)))?
    }
}
