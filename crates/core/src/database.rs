//! Connection pool and request-scoped sessions.
//!
//! A [`Session`] wraps at most one open transaction. DAOs borrow its
//! connection per query; only the owner of the use-case commits.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, Transaction};
use thiserror::Error;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::config::DatabaseConfig;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Shared connection pool for the catalog store
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for the configured store.
    ///
    /// In-memory stores are pinned to a single connection that is never
    /// recycled, otherwise every new connection would see an empty database.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::debug!(url = %config.url, "connected to catalog store");

        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Start a new request-scoped session
    pub fn session(&self) -> Session {
        Session::new(self.pool.clone())
    }
}

/// Unit of work shared by every DAO taking part in one use-case.
///
/// The transaction begins on first use. After `commit` or `rollback` the
/// next query begins a fresh one. Dropping the last handle of an
/// uncommitted session rolls it back.
#[derive(Clone)]
pub struct Session {
    pool: SqlitePool,
    tx: Arc<Mutex<Option<Transaction<'static, Sqlite>>>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("pool", &self.pool).finish_non_exhaustive()
    }
}

impl Session {
    fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            tx: Arc::new(Mutex::new(None)),
        }
    }

    /// Borrow the connection of the current transaction, beginning one if needed
    pub async fn conn(&self) -> Result<MappedMutexGuard<'_, SqliteConnection>> {
        let mut guard = self.tx.lock().await;
        if guard.is_none() {
            *guard = Some(self.pool.begin().await?);
        }

        // The slot was filled above, so the mapping cannot fail.
        MutexGuard::try_map(guard, |slot| slot.as_deref_mut())
            .map_err(|_| DatabaseError::Sqlx(sqlx::Error::PoolClosed))
    }

    /// Commit the open transaction; a no-op when nothing is pending
    pub async fn commit(&self) -> Result<()> {
        let tx = self.tx.lock().await.take();
        if let Some(tx) = tx {
            tx.commit().await?;
        }
        Ok(())
    }

    /// Discard the open transaction; a no-op when nothing is pending
    pub async fn rollback(&self) -> Result<()> {
        let tx = self.tx.lock().await.take();
        if let Some(tx) = tx {
            tx.rollback().await?;
        }
        Ok(())
    }

    /// Whether a transaction is currently open
    pub async fn in_transaction(&self) -> bool {
        self.tx.lock().await.is_some()
    }
}
