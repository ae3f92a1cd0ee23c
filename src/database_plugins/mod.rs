// ABOUTME: Database abstraction layer for rowbind write execution
// ABOUTME: Plugin architecture with SQLite and PostgreSQL backends

use crate::errors::Result;
use crate::record::Record;
use crate::schema::TableSchema;
use async_trait::async_trait;

pub mod factory;
pub mod sqlite;

#[cfg(feature = "postgresql")]
pub mod postgres;

/// Target database engine for value encoding decisions.
///
/// PostgreSQL enforces strict column typing: boolean columns accept only
/// native booleans. SQLite accepts integer-encoded booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// SQLite, which accepts integer-encoded booleans
    Sqlite,
    /// PostgreSQL, which enforces strict boolean typing
    Postgres,
}

impl BackendKind {
    /// Whether this backend rejects implicit boolean-to-integer coercion
    #[must_use]
    pub const fn strict_boolean_typing(self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Detect the backend from a connection string.
    ///
    /// Never fails: an unrecognized URL yields `None`, and callers fall
    /// back to leaving values uncoerced.
    #[must_use]
    pub fn from_url(database_url: &str) -> Option<Self> {
        if database_url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else if database_url.starts_with("postgresql://")
            || database_url.starts_with("postgres://")
        {
            Some(Self::Postgres)
        } else {
            None
        }
    }

    /// Short name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgresql",
        }
    }
}

/// Write-execution abstraction implemented by each backend.
///
/// Implementations render the two fixed statement shapes (INSERT,
/// UPDATE-by-key) and bind the normalized parameters produced by
/// [`crate::writer`].
#[async_trait]
pub trait WriteExecutor: Send + Sync {
    /// Open a connection pool for the given URL
    async fn connect(database_url: &str) -> Result<Self>
    where
        Self: Sized;

    /// Backend kind used for parameter selection
    fn backend_kind(&self) -> BackendKind;

    /// Create the table described by `schema` if it does not exist
    async fn ensure_table(&self, schema: &TableSchema) -> Result<()>;

    /// Insert a record, normalizing each column independently
    async fn insert(&self, record: &Record) -> Result<()>;

    /// Update a record by primary key; returns affected row count
    async fn update(&self, record: &Record) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_detection_covers_both_schemes() {
        assert_eq!(
            BackendKind::from_url("sqlite:./data/app.db"),
            Some(BackendKind::Sqlite)
        );
        assert_eq!(
            BackendKind::from_url("sqlite::memory:"),
            Some(BackendKind::Sqlite)
        );
        assert_eq!(
            BackendKind::from_url("postgresql://u:p@localhost/app"),
            Some(BackendKind::Postgres)
        );
        assert_eq!(
            BackendKind::from_url("postgres://u:p@localhost/app"),
            Some(BackendKind::Postgres)
        );
    }

    #[test]
    fn unrecognized_urls_resolve_to_none() {
        assert_eq!(BackendKind::from_url("mysql://localhost/app"), None);
        assert_eq!(BackendKind::from_url(""), None);
    }

    #[test]
    fn only_postgres_is_strict() {
        assert!(BackendKind::Postgres.strict_boolean_typing());
        assert!(!BackendKind::Sqlite.strict_boolean_typing());
    }
}
