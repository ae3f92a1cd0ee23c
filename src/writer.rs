// ABOUTME: Write-path parameter selection for insert and update statements
// ABOUTME: Per-column, backend-dispatched, with the soft-delete flag override

//! Parameter selection.
//!
//! Every column being written gets its own [`NormalizedParameter`],
//! computed independently from the declared value, the declared column
//! type, and an explicit [`BackendKind`]. No state is shared across
//! columns; one column's normalized value is never reused for another.

use crate::database_plugins::BackendKind;
use crate::errors::{Result, RowbindError};
use crate::normalize::normalize_bool;
use crate::record::Record;
use crate::schema::{ColumnType, TableSchema};
use crate::value::{FieldValue, SqlParam};
use tracing::debug;

/// A (value, declared-type) pair ready for serialization into a write
/// statement. Constructed fresh for every column on every write.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedParameter {
    /// Column the parameter is bound for
    pub column: String,
    /// Wire-ready value
    pub value: SqlParam,
    /// Declared type of the column, used for typed NULL binds
    pub column_type: ColumnType,
}

/// Parameters for an UPDATE: the SET assignments plus the WHERE key
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateParameters {
    /// One parameter per assigned non-key column, in assignment order
    pub assignments: Vec<NormalizedParameter>,
    /// Primary key parameter for the WHERE clause
    pub key: NormalizedParameter,
}

/// Select the parameter for one column.
///
/// Rules, in order:
///
/// 1. The designated soft-delete flag always binds integer zero,
///    regardless of backend and of the assigned value.
/// 2. A logical false assigned to a non-boolean column is reinterpreted
///    as "no value supplied" and binds NULL, never a literal false.
/// 3. A boolean column on a strict-typing backend binds the normalized
///    logical value (absent → NULL).
/// 4. Everything else binds the value's natural encoding for the
///    backend.
///
/// # Errors
///
/// Returns [`RowbindError::UnknownColumn`] if the schema does not
/// declare `column`.
pub fn select_parameter(
    schema: &TableSchema,
    column: &str,
    value: &FieldValue,
    backend: BackendKind,
) -> Result<NormalizedParameter> {
    let Some(column_type) = schema.column_type(column) else {
        return Err(RowbindError::UnknownColumn {
            table: schema.table().to_string(),
            column: column.to_string(),
        });
    };

    let param = if schema.is_soft_delete_flag(column) {
        SqlParam::Int(0)
    } else if matches!(value, FieldValue::Bool(false)) && column_type != ColumnType::Boolean {
        debug!(
            table = schema.table(),
            column, "reinterpreting false sentinel as NULL for non-boolean column"
        );
        SqlParam::Null
    } else if column_type == ColumnType::Boolean && backend.strict_boolean_typing() {
        match normalize_bool(value) {
            Some(b) => SqlParam::Bool(b),
            None => SqlParam::Null,
        }
    } else {
        SqlParam::encode(value, backend)
    };

    Ok(NormalizedParameter {
        column: column.to_string(),
        value: param,
        column_type,
    })
}

/// Parameters for inserting a record, one per assigned column.
///
/// # Errors
///
/// Returns [`RowbindError::UnknownColumn`] if the record carries a
/// column the schema does not declare.
pub fn insert_parameters(record: &Record, backend: BackendKind) -> Result<Vec<NormalizedParameter>> {
    record
        .entries()
        .iter()
        .map(|(column, value)| select_parameter(record.schema(), column, value, backend))
        .collect()
}

/// Parameters for updating a record by primary key.
///
/// The primary key column is excluded from the SET assignments and
/// returned separately as the WHERE key, encoded naturally.
///
/// # Errors
///
/// Returns [`RowbindError::MissingPrimaryKey`] if the record has no
/// value for the primary key column, or
/// [`RowbindError::UnknownColumn`] for undeclared columns.
pub fn update_parameters(record: &Record, backend: BackendKind) -> Result<UpdateParameters> {
    let schema = record.schema();
    let pk = schema.primary_key();

    let key_value = record
        .value(pk)
        .filter(|v| !v.is_absent())
        .ok_or_else(|| RowbindError::MissingPrimaryKey(pk.to_string()))?;
    let Some(key_type) = schema.column_type(pk) else {
        return Err(RowbindError::UnknownColumn {
            table: schema.table().to_string(),
            column: pk.to_string(),
        });
    };

    let assignments = record
        .entries()
        .iter()
        .filter(|(column, _)| column.as_str() != pk)
        .map(|(column, value)| select_parameter(schema, column, value, backend))
        .collect::<Result<Vec<_>>>()?;

    Ok(UpdateParameters {
        assignments,
        key: NormalizedParameter {
            column: pk.to_string(),
            value: SqlParam::encode(key_value, backend),
            column_type: key_type,
        },
    })
}
