// ABOUTME: Table schema description consumed by the write path
// ABOUTME: Declared column types, primary key, and the designated soft-delete flag

//! Minimal table description.
//!
//! The write path needs exactly three things from a schema: the declared
//! type of each column, which column is the primary key, and which
//! column (if any) is the soft-delete flag. Nothing else of the host
//! data model is described here.

use serde::{Deserialize, Serialize};

/// Declared semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Logical true/false
    Boolean,
    /// 64-bit integer
    Integer,
    /// Double-precision float
    Float,
    /// UTF-8 text
    Text,
    /// UUID identifier
    Uuid,
    /// UTC timestamp
    Timestamp,
    /// Structured JSON
    Json,
}

/// A named column with its declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name as it appears in SQL
    pub name: String,
    /// Declared semantic type
    pub column_type: ColumnType,
}

impl ColumnDef {
    /// Define a column
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Schema of one table: the declared-type lookup the write path consults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    table: String,
    primary_key: String,
    columns: Vec<ColumnDef>,
    soft_delete: Option<String>,
}

impl TableSchema {
    /// Describe a table. `primary_key` must name one of `columns`.
    pub fn new(
        table: impl Into<String>,
        primary_key: impl Into<String>,
        columns: Vec<ColumnDef>,
    ) -> Self {
        let table = table.into();
        let primary_key = primary_key.into();
        debug_assert!(
            columns.iter().any(|c| c.name == primary_key),
            "primary key '{primary_key}' is not a declared column of '{table}'"
        );
        Self {
            table,
            primary_key,
            columns,
            soft_delete: None,
        }
    }

    /// Designate the soft-delete flag column.
    ///
    /// The flag is always written as integer zero, regardless of backend
    /// and of any value assigned to it.
    #[must_use]
    pub fn with_soft_delete(mut self, column: impl Into<String>) -> Self {
        self.soft_delete = Some(column.into());
        self
    }

    /// Table name
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Primary key column name
    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Declared columns, in definition order
    #[must_use]
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Declared-type lookup for one column
    #[must_use]
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.column_type)
    }

    /// Whether `name` is the designated soft-delete flag
    #[must_use]
    pub fn is_soft_delete_flag(&self, name: &str) -> bool {
        self.soft_delete.as_deref() == Some(name)
    }
}
