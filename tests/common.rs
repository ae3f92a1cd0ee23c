// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases, and schema builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(dead_code)]

//! Shared test utilities for `rowbind` integration tests

use rowbind::database_plugins::sqlite::SqliteWrites;
use rowbind::database_plugins::WriteExecutor;
use rowbind::errors::Result;
use rowbind::schema::{ColumnDef, ColumnType, TableSchema};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory SQLite database for write tests
pub async fn create_test_database() -> Result<SqliteWrites> {
    init_test_logging();
    SqliteWrites::connect("sqlite::memory:").await
}

/// Schema exercising every column type, with a designated soft-delete flag
pub fn items_schema() -> Arc<TableSchema> {
    Arc::new(
        TableSchema::new(
            "items",
            "id",
            vec![
                ColumnDef::new("id", ColumnType::Uuid),
                ColumnDef::new("count", ColumnType::Integer),
                ColumnDef::new("active", ColumnType::Boolean),
                ColumnDef::new("note", ColumnType::Text),
                ColumnDef::new("score", ColumnType::Float),
                ColumnDef::new("created_at", ColumnType::Timestamp),
                ColumnDef::new("meta", ColumnType::Json),
                ColumnDef::new("deleted", ColumnType::Integer),
            ],
        )
        .with_soft_delete("deleted"),
    )
}
