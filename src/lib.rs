// ABOUTME: Main library entry point for the rowbind write-path normalization crate
// ABOUTME: Normalizes boolean values into correctly typed SQL parameters per backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # rowbind
//!
//! Write-path value normalization and typed parameter binding for
//! SQLite and PostgreSQL.
//!
//! Application data layers are loose about booleans: `1`, `"yes"`,
//! `"true"`, `true`, and `""` all show up where a boolean column is
//! declared, and a bare `false` often means "no value supplied" rather
//! than a literal false. SQLite shrugs and stores whatever arrives;
//! PostgreSQL rejects the write. rowbind closes that gap:
//!
//! - **Normalization**: a total, pure tri-state normalizer maps any
//!   field value to true, false, or absent
//! - **Parameter selection**: every column of an insert or update is
//!   normalized independently against its declared type and an explicit
//!   backend kind: native booleans for strict-typing backends,
//!   integer 1/0 elsewhere, NULL for the absent-value sentinel
//! - **Execution**: sqlx-backed executors render the statements and
//!   bind the normalized parameters, selected at runtime from the
//!   connection string
//!
//! ## Example
//!
//! ```rust
//! use rowbind::database_plugins::BackendKind;
//! use rowbind::record::Record;
//! use rowbind::schema::{ColumnDef, ColumnType, TableSchema};
//! use rowbind::value::{FieldValue, SqlParam};
//! use rowbind::writer::insert_parameters;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = Arc::new(TableSchema::new(
//!     "items",
//!     "id",
//!     vec![
//!         ColumnDef::new("id", ColumnType::Integer),
//!         ColumnDef::new("count", ColumnType::Integer),
//!         ColumnDef::new("active", ColumnType::Boolean),
//!     ],
//! ));
//!
//! let mut record = Record::for_backend(Arc::clone(&schema), BackendKind::Postgres);
//! record.set_value("id", FieldValue::Int(1))?;
//! record.set_value("count", FieldValue::Bool(false))?; // sentinel: no value supplied
//! record.set_value("active", "yes".into())?;
//!
//! let params = insert_parameters(&record, BackendKind::Postgres)?;
//! assert_eq!(params[1].value, SqlParam::Null); // never a literal false
//! assert_eq!(params[2].value, SqlParam::Bool(true));
//! # Ok(())
//! # }
//! ```

/// Environment-based configuration
pub mod config;

/// Database backends, backend detection, and the executor factory
pub mod database_plugins;

/// Central error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Tri-state boolean normalization
pub mod normalize;

/// Records and assignment-time coercion
pub mod record;

/// Table schema description
pub mod schema;

/// Field values and wire-ready SQL parameters
pub mod value;

/// Write-path parameter selection
pub mod writer;

pub use database_plugins::BackendKind;
pub use errors::RowbindError;
pub use normalize::normalize_bool;
pub use value::{FieldValue, SqlParam};
