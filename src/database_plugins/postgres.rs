//! PostgreSQL write execution.
//!
//! PostgreSQL enforces strict column typing: boolean parameters bind as
//! native booleans and NULLs are bound with the declared column type so
//! statement preparation infers the right parameter types.

use super::{BackendKind, WriteExecutor};
use crate::errors::Result;
use crate::record::Record;
use crate::schema::{ColumnType, TableSchema};
use crate::value::SqlParam;
use crate::writer::{self, NormalizedParameter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::Query;
use sqlx::Postgres;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL write executor over a sqlx connection pool
#[derive(Clone, Debug)]
pub struct PostgresWrites {
    pool: PgPool,
}

impl PostgresWrites {
    /// Reference to the underlying pool, for read-back and verification
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl WriteExecutor for PostgresWrites {
    async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    fn backend_kind(&self) -> BackendKind {
        BackendKind::Postgres
    }

    async fn ensure_table(&self, schema: &TableSchema) -> Result<()> {
        let columns: Vec<String> = schema
            .columns()
            .iter()
            .map(|c| {
                let mut def = format!("{} {}", c.name, postgres_type(c.column_type));
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
        let params = writer::insert_parameters(record, BackendKind::Postgres)?;
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
        let plan = writer::update_parameters(record, BackendKind::Postgres)?;
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

const fn postgres_type(column_type: ColumnType) -> &'static str {
    match column_type {
        ColumnType::Boolean => "BOOLEAN",
        ColumnType::Integer => "BIGINT",
        ColumnType::Float => "DOUBLE PRECISION",
        ColumnType::Text => "TEXT",
        ColumnType::Uuid => "UUID",
        ColumnType::Timestamp => "TIMESTAMPTZ",
        ColumnType::Json => "JSONB",
    }
}

fn bind_parameter<'q>(
    query: Query<'q, Postgres, PgArguments>,
    param: &'q NormalizedParameter,
) -> Query<'q, Postgres, PgArguments> {
    match &param.value {
        // NULLs carry the declared column type so prepared-statement
        // parameter inference matches the column.
        SqlParam::Null => match param.column_type {
            ColumnType::Boolean => query.bind(None::<bool>),
            ColumnType::Integer => query.bind(None::<i64>),
            ColumnType::Float => query.bind(None::<f64>),
            ColumnType::Text => query.bind(None::<String>),
            ColumnType::Uuid => query.bind(None::<Uuid>),
            ColumnType::Timestamp => query.bind(None::<DateTime<Utc>>),
            ColumnType::Json => query.bind(None::<serde_json::Value>),
        },
        SqlParam::Bool(b) => query.bind(*b),
        SqlParam::Int(n) => query.bind(*n),
        SqlParam::Float(f) => query.bind(*f),
        SqlParam::Text(s) => query.bind(s.as_str()),
        SqlParam::Uuid(u) => query.bind(*u),
        SqlParam::Timestamp(ts) => query.bind(*ts),
        SqlParam::Json(v) => query.bind(v.clone()),
    }
}
