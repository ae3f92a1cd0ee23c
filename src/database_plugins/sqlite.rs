//! SQLite write execution.
//!
//! SQLite accepts integer-encoded booleans, so boolean parameters bind
//! as integer 1/0 and UUIDs bind as hyphenated text.

use super::{BackendKind, WriteExecutor};
use crate::errors::Result;
use crate::record::Record;
use crate::schema::{ColumnType, TableSchema};
use crate::value::SqlParam;
use crate::writer::{self, NormalizedParameter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool};
use tracing::debug;

/// SQLite write executor over a sqlx connection pool
#[derive(Clone, Debug)]
pub struct SqliteWrites {
    pool: SqlitePool,
}

impl SqliteWrites {
    /// Reference to the underlying pool, for read-back and verification
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl WriteExecutor for SqliteWrites {
    async fn connect(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };
        let pool = SqlitePool::connect(&connection_options).await?;
        Ok(Self { pool })
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    async fn ensure_table(&self, schema: &TableSchema) -> Result<()> {
        let columns: Vec<String> = schema
            .columns()
            .iter()
            .map(|c| {
                let mut def = format!("{} {}", c.name, sqlite_type(c.column_type));
                if c.name == schema.primary_key() {
                    def.push_str(" PRIMARY KEY");
                }
                def
            })
            .collect();
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            schema.table(),
            columns.join(", ")
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, record: &Record) -> Result<()> {
        let params = writer::insert_parameters(record, BackendKind::Sqlite)?;
        if params.is_empty() {
            debug!(table = record.schema().table(), "insert with no assigned columns; skipping");
            return Ok(());
        }
        let columns: Vec<&str> = params.iter().map(|p| p.column.as_str()).collect();
        let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            record.schema().table(),
            columns.join(", "),
            placeholders.join(", ")
        );
        let mut query = sqlx::query(&sql);
        for param in &params {
            query = bind_parameter(query, param);
        }
        query.execute(&self.pool).await?;
        Ok(())
    }

    async fn update(&self, record: &Record) -> Result<u64> {
        let plan = writer::update_parameters(record, BackendKind::Sqlite)?;
        if plan.assignments.is_empty() {
            debug!(table = record.schema().table(), "update with no assigned columns; skipping");
            return Ok(0);
        }
        let sets: Vec<String> = plan
            .assignments
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} = ${}", p.column, i + 1))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            record.schema().table(),
            sets.join(", "),
            plan.key.column,
            plan.assignments.len() + 1
        );
        let mut query = sqlx::query(&sql);
        for param in &plan.assignments {
            query = bind_parameter(query, param);
        }
        query = bind_parameter(query, &plan.key);
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

const fn sqlite_type(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Boolean => "BOOLEAN",
        ColumnType::Integer => "INTEGER",
        ColumnType::Float => "REAL",
        ColumnType::Text | ColumnType::Uuid | ColumnType::Json => "TEXT",
        ColumnType::Timestamp => "DATETIME",
    }
}

fn bind_parameter<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    param: &'q NormalizedParameter,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match &param.value {
        SqlParam::Null => match param.column_type {
            ColumnType::Boolean | ColumnType::Integer => query.bind(None::<i64>),
            ColumnType::Float => query.bind(None::<f64>),
            ColumnType::Timestamp => query.bind(None::<DateTime<Utc>>),
            ColumnType::Text | ColumnType::Uuid | ColumnType::Json => query.bind(None::<String>),
        },
        // Integer-encoded booleans: SQLite has no native boolean storage
        SqlParam::Bool(b) => query.bind(i64::from(*b)),
        SqlParam::Int(n) => query.bind(*n),
        SqlParam::Float(f) => query.bind(*f),
        SqlParam::Text(s) => query.bind(s.as_str()),
        SqlParam::Uuid(u) => query.bind(u.to_string()),
        SqlParam::Timestamp(ts) => query.bind(*ts),
        SqlParam::Json(v) => query.bind(v.clone()),
    }
}
