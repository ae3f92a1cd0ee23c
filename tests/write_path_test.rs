// ABOUTME: Tests for write-path parameter selection across backends
// ABOUTME: Covers sentinel reinterpretation, strict boolean normalization, and the soft-delete override

mod common;

use common::items_schema;
use rowbind::database_plugins::BackendKind;
use rowbind::errors::RowbindError;
use rowbind::record::Record;
use rowbind::value::{FieldValue, SqlParam};
use rowbind::writer::{insert_parameters, select_parameter, update_parameters};
use std::sync::Arc;
use uuid::Uuid;

#[test]
fn strict_backend_normalizes_the_documented_example() {
    // (count: INTEGER = false, active: BOOLEAN = "yes") on the strict
    // backend must yield (count = NULL, active = true)
    let schema = items_schema();
    let mut record = Record::for_backend(Arc::clone(&schema), BackendKind::Postgres);
    record.set_value("id", Uuid::new_v4().into()).unwrap();
    record.set_value("count", FieldValue::Bool(false)).unwrap();
    record.set_value("active", "yes".into()).unwrap();

    let params = insert_parameters(&record, BackendKind::Postgres).unwrap();
    let count = params.iter().find(|p| p.column == "count").unwrap();
    let active = params.iter().find(|p| p.column == "active").unwrap();
    assert_eq!(count.value, SqlParam::Null);
    assert_eq!(active.value, SqlParam::Bool(true));
}

#[test]
fn false_sentinel_becomes_null_for_every_non_boolean_column() {
    let schema = items_schema();
    for backend in [BackendKind::Sqlite, BackendKind::Postgres] {
        for column in ["count", "note", "score", "created_at", "meta"] {
            let param =
                select_parameter(&schema, column, &FieldValue::Bool(false), backend).unwrap();
            assert_eq!(
                param.value,
                SqlParam::Null,
                "false sentinel must bind NULL for '{column}' on {backend:?}"
            );
        }
    }
}

#[test]
fn true_passes_through_non_boolean_columns_as_integer_one() {
    let schema = items_schema();
    let param =
        select_parameter(&schema, "count", &FieldValue::Bool(true), BackendKind::Sqlite).unwrap();
    assert_eq!(param.value, SqlParam::Int(1));
}

#[test]
fn strict_backend_boolean_column_accepts_truthy_spellings() {
    let schema = items_schema();
    for value in [
        FieldValue::Int(1),
        FieldValue::Text("true".into()),
        FieldValue::Text("yes".into()),
        FieldValue::Bool(true),
    ] {
        let param = select_parameter(&schema, "active", &value, BackendKind::Postgres).unwrap();
        assert_eq!(
            param.value,
            SqlParam::Bool(true),
            "expected {value:?} to bind as boolean true"
        );
    }
}

#[test]
fn strict_backend_boolean_column_accepts_falsy_spellings() {
    let schema = items_schema();
    for value in [
        FieldValue::Int(0),
        FieldValue::Text("false".into()),
        FieldValue::Text("no".into()),
        FieldValue::Text(String::new()),
        FieldValue::Bool(false),
    ] {
        let param = select_parameter(&schema, "active", &value, BackendKind::Postgres).unwrap();
        assert_eq!(
            param.value,
            SqlParam::Bool(false),
            "expected {value:?} to bind as boolean false"
        );
    }
}

#[test]
fn strict_backend_binds_absent_boolean_as_null() {
    let schema = items_schema();
    let param =
        select_parameter(&schema, "active", &FieldValue::Absent, BackendKind::Postgres).unwrap();
    assert_eq!(param.value, SqlParam::Null);
}

#[test]
fn non_strict_backend_passes_boolean_column_values_through() {
    let schema = items_schema();
    // SQLite accepts integer-encoded booleans; raw values are not
    // normalized on the way through, only naturally encoded.
    let text = select_parameter(
        &schema,
        "active",
        &FieldValue::Text("yes".into()),
        BackendKind::Sqlite,
    )
    .unwrap();
    assert_eq!(text.value, SqlParam::Text("yes".into()));

    let logical =
        select_parameter(&schema, "active", &FieldValue::Bool(true), BackendKind::Sqlite).unwrap();
    assert_eq!(logical.value, SqlParam::Int(1));
}

#[test]
fn soft_delete_flag_always_binds_integer_zero() {
    let schema = items_schema();
    for backend in [BackendKind::Sqlite, BackendKind::Postgres] {
        for value in [
            FieldValue::Bool(true),
            FieldValue::Bool(false),
            FieldValue::Int(7),
            FieldValue::Text("yes".into()),
            FieldValue::Absent,
        ] {
            let param = select_parameter(&schema, "deleted", &value, backend).unwrap();
            assert_eq!(
                param.value,
                SqlParam::Int(0),
                "soft-delete flag must ignore {value:?} on {backend:?}"
            );
        }
    }
}

#[test]
fn columns_are_normalized_independently() {
    // A false sentinel in one column must not leak into its neighbors.
    let schema = items_schema();
    let mut record = Record::for_backend(Arc::clone(&schema), BackendKind::Postgres);
    record.set_value("id", Uuid::new_v4().into()).unwrap();
    record.set_value("count", FieldValue::Bool(false)).unwrap();
    record.set_value("active", "on".into()).unwrap();
    record.set_value("note", "kept".into()).unwrap();

    let params = insert_parameters(&record, BackendKind::Postgres).unwrap();
    let by_column = |name: &str| params.iter().find(|p| p.column == name).unwrap();
    assert_eq!(by_column("count").value, SqlParam::Null);
    assert_eq!(by_column("active").value, SqlParam::Bool(true));
    assert_eq!(by_column("note").value, SqlParam::Text("kept".into()));
}

#[test]
fn unknown_column_is_rejected() {
    let schema = items_schema();
    let err = select_parameter(&schema, "bogus", &FieldValue::Int(1), BackendKind::Sqlite)
        .unwrap_err();
    assert!(matches!(err, RowbindError::UnknownColumn { .. }));
}

#[test]
fn update_excludes_the_primary_key_from_assignments() {
    let schema = items_schema();
    let id = Uuid::new_v4();
    let mut record = Record::for_backend(Arc::clone(&schema), BackendKind::Postgres);
    record.set_value("id", id.into()).unwrap();
    record.set_value("active", "no".into()).unwrap();
    record.set_value("note", FieldValue::Bool(false)).unwrap();

    let plan = update_parameters(&record, BackendKind::Postgres).unwrap();
    assert!(plan.assignments.iter().all(|p| p.column != "id"));
    assert_eq!(plan.key.column, "id");
    assert_eq!(plan.key.value, SqlParam::Uuid(id));

    let by_column = |name: &str| plan.assignments.iter().find(|p| p.column == name).unwrap();
    assert_eq!(by_column("active").value, SqlParam::Bool(false));
    assert_eq!(by_column("note").value, SqlParam::Null);
}

#[test]
fn update_without_primary_key_value_is_rejected() {
    let schema = items_schema();
    let mut record = Record::for_backend(Arc::clone(&schema), BackendKind::Sqlite);
    record.set_value("note", "orphan".into()).unwrap();

    let err = update_parameters(&record, BackendKind::Sqlite).unwrap_err();
    assert!(matches!(err, RowbindError::MissingPrimaryKey(_)));
}
