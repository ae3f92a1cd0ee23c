// ABOUTME: Record abstraction carrying column values toward a write
// ABOUTME: Applies assignment-time boolean coercion for the resolved backend

//! Records and assignment-time coercion.
//!
//! A [`Record`] holds the values destined for one row, in assignment
//! order, together with its table schema and the backend kind resolved
//! once at construction. Values assigned to boolean-typed columns are
//! coerced immediately: logical booleans for a strict-typing backend,
//! integer 1/0 for the rest. Backend resolution never fails loudly: an
//! unrecognized connection string leaves assignments uncoerced.

use crate::database_plugins::BackendKind;
use crate::errors::{Result, RowbindError};
use crate::normalize::normalize_bool;
use crate::schema::{ColumnType, TableSchema};
use crate::value::FieldValue;
use std::sync::Arc;

/// Column values for one row, staged for insert or update
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<TableSchema>,
    backend: Option<BackendKind>,
    values: Vec<(String, FieldValue)>,
}

impl Record {
    /// Create a record with no backend resolved; assignments to boolean
    /// columns are stored uncoerced.
    #[must_use]
    pub fn new(schema: Arc<TableSchema>) -> Self {
        Self {
            schema,
            backend: None,
            values: Vec::new(),
        }
    }

    /// Create a record for a known backend
    #[must_use]
    pub fn for_backend(schema: Arc<TableSchema>, backend: BackendKind) -> Self {
        Self {
            schema,
            backend: Some(backend),
            values: Vec::new(),
        }
    }

    /// Create a record, resolving the backend from a connection string.
    ///
    /// Resolution never raises: an unrecognized URL yields a record with
    /// no backend, and assignments stay uncoerced.
    #[must_use]
    pub fn for_database_url(schema: Arc<TableSchema>, database_url: &str) -> Self {
        let backend = BackendKind::from_url(database_url);
        if backend.is_none() {
            tracing::debug!(
                "no backend recognized in database URL; storing assignments uncoerced"
            );
        }
        Self {
            schema,
            backend,
            values: Vec::new(),
        }
    }

    /// Assign a value to a column.
    ///
    /// Boolean-typed columns are coerced at assignment time per the
    /// resolved backend; all other columns store the value unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RowbindError::UnknownColumn`] if the schema does not
    /// declare `column`.
    pub fn set_value(&mut self, column: &str, value: FieldValue) -> Result<()> {
        let Some(column_type) = self.schema.column_type(column) else {
            return Err(RowbindError::UnknownColumn {
                table: self.schema.table().to_string(),
                column: column.to_string(),
            });
        };
        let stored = if column_type == ColumnType::Boolean {
            coerce_assignment(value, self.backend)
        } else {
            value
        };
        if let Some(slot) = self
            .values
            .iter_mut()
            .find(|(name, _)| name.as_str() == column)
        {
            slot.1 = stored;
        } else {
            self.values.push((column.to_string(), stored));
        }
        Ok(())
    }

    /// Currently assigned value for a column, if any
    #[must_use]
    pub fn value(&self, column: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| name.as_str() == column)
            .map(|(_, v)| v)
    }

    /// Assigned `(column, value)` pairs, in assignment order
    #[must_use]
    pub fn entries(&self) -> &[(String, FieldValue)] {
        &self.values
    }

    /// Schema this record writes against
    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Backend resolved at construction, if any
    #[must_use]
    pub const fn backend(&self) -> Option<BackendKind> {
        self.backend
    }

    /// Populate a record from a JSON object, one field per key.
    ///
    /// # Errors
    ///
    /// Returns [`RowbindError::UnknownColumn`] for any key the schema
    /// does not declare.
    pub fn set_from_json(&mut self, object: serde_json::Map<String, serde_json::Value>) -> Result<()> {
        for (column, value) in object {
            self.set_value(&column, FieldValue::from_json(value))?;
        }
        Ok(())
    }
}

/// Assignment-time coercion for boolean-typed columns.
///
/// Strict-typing backends store a logical boolean, the rest store
/// integer 1/0. An unresolved backend (`None`) leaves the value
/// untouched, and an absent value stays absent on every backend.
#[must_use]
pub fn coerce_assignment(value: FieldValue, backend: Option<BackendKind>) -> FieldValue {
    let Some(backend) = backend else {
        return value;
    };
    match normalize_bool(&value) {
        None => FieldValue::Absent,
        Some(b) if backend.strict_boolean_typing() => FieldValue::Bool(b),
        Some(b) => FieldValue::Int(i64::from(b)),
    }
}
