// ABOUTME: Database factory and executor wrapper for multi-database support
// ABOUTME: Unified interface over SQLite and PostgreSQL with runtime backend selection
//! Database factory.
//!
//! Detects the backend from a connection string and wraps the concrete
//! executor in a single [`Database`] enum that delegates every
//! operation.

use super::{BackendKind, WriteExecutor};
use crate::errors::{Result, RowbindError};
use crate::record::Record;
use crate::schema::TableSchema;
use async_trait::async_trait;
use tracing::{debug, info};

#[cfg(feature = "postgresql")]
use super::postgres::PostgresWrites;
use super::sqlite::SqliteWrites;

/// Database instance wrapper that delegates to the appropriate backend
#[derive(Clone, Debug)]
pub enum Database {
    /// SQLite executor
    Sqlite(SqliteWrites),
    /// PostgreSQL executor
    #[cfg(feature = "postgresql")]
    Postgres(PostgresWrites),
}

impl Database {
    /// Create a database instance based on the connection string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL format is unsupported, the
    /// `postgresql` feature is disabled for a PostgreSQL URL, or the
    /// connection itself fails.
    pub async fn connect(database_url: &str) -> Result<Self> {
        debug!("detecting backend from database URL");
        match BackendKind::from_url(database_url) {
            Some(BackendKind::Sqlite) => {
                info!("initializing SQLite backend");
                let db = SqliteWrites::connect(database_url).await?;
                Ok(Self::Sqlite(db))
            }
            #[cfg(feature = "postgresql")]
            Some(BackendKind::Postgres) => {
                info!("initializing PostgreSQL backend");
                let db = PostgresWrites::connect(database_url).await?;
                Ok(Self::Postgres(db))
            }
            #[cfg(not(feature = "postgresql"))]
            Some(BackendKind::Postgres) => Err(RowbindError::PostgresNotEnabled),
            None => Err(RowbindError::UnsupportedDatabaseUrl(
                database_url.to_string(),
            )),
        }
    }

    /// Descriptive string for the current backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "SQLite (integer-encoded booleans)",
            #[cfg(feature = "postgresql")]
            Self::Postgres(_) => "PostgreSQL (strict boolean typing)",
        }
    }
}

#[async_trait]
impl WriteExecutor for Database {
    async fn connect(database_url: &str) -> Result<Self> {
        Self::connect(database_url).await
    }

    fn backend_kind(&self) -> BackendKind {
        match self {
            Self::Sqlite(db) => db.backend_kind(),
            #[cfg(feature = "postgresql")]
            Self::Postgres(db) => db.backend_kind(),
        }
    }

    async fn ensure_table(&self, schema: &TableSchema) -> Result<()> {
        match self {
            Self::Sqlite(db) => db.ensure_table(schema).await,
            #[cfg(feature = "postgresql")]
            Self::Postgres(db) => db.ensure_table(schema).await,
        }
    }

    async fn insert(&self, record: &Record) -> Result<()> {
        match self {
            Self::Sqlite(db) => db.insert(record).await,
            #[cfg(feature = "postgresql")]
            Self::Postgres(db) => db.insert(record).await,
        }
    }

    async fn update(&self, record: &Record) -> Result<u64> {
        match self {
            Self::Sqlite(db) => db.update(record).await,
            #[cfg(feature = "postgresql")]
            Self::Postgres(db) => db.update(record).await,
        }
    }
}
