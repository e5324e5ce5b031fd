//! Schema Invariant Tests
//!
//! - Decode strips the header row; encode prepends one from the column names
//! - Processing stops at the first failing cell of the first failing row
//! - Errors read "<row>:<cell>: <column>: <message>"
//! - String length limits are inclusive
//! - Processing is deterministic

use centrus::schema::{
    decode_rows, decode_table, encode_rows, encode_table, process_cell, process_row,
    validate_table, Column, Decode, Encode, FieldDef, RawRow, Schema, SchemaErrorCode, Value,
};
use chrono::NaiveDate;

// =============================================================================
// Helper Functions
// =============================================================================

fn employees() -> Schema {
    Schema::new(
        "employees",
        vec![
            Column::new("Name", FieldDef::string(true, 50)),
            Column::new("Salary", FieldDef::float(true)),
        ],
    )
}

fn contacts() -> Schema {
    Schema::new(
        "contacts",
        vec![
            Column::new("name", FieldDef::string(true, 20)),
            Column::new("age", FieldDef::int(false)),
            Column::new("birthday", FieldDef::date(false)),
            Column::new("createdAt", FieldDef::timestamp(true)),
        ],
    )
}

fn raw(data: &[&[&str]]) -> Vec<RawRow> {
    data.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

// =============================================================================
// Table Decoding Tests
// =============================================================================

/// First failing row and cell are reported with their indexes.
#[test]
fn test_decode_reports_first_failure() {
    let table = raw(&[
        &["Name", "Salary"],
        &["Alice", "50000"],
        &["Bob", "not-a-number"],
    ]);

    let err = decode_rows(&employees(), &table).unwrap_err();
    assert_eq!(err.to_string(), "1:1: Salary: Cannot convert \"not-a-number\" to Float.");
    assert_eq!(err.code(), SchemaErrorCode::TypeConversion);
    assert_eq!(err.row(), Some(1));
    assert_eq!(err.cell(), Some(1));
    assert_eq!(err.column(), Some("Salary"));
}

/// Header content is never checked against the schema.
#[test]
fn test_decode_ignores_header_content() {
    let table = raw(&[&["whatever", "12345", "extra"], &["Alice", "50000"]]);
    let rows = decode_rows(&employees(), &table).unwrap();
    assert_eq!(rows, vec![vec![Value::from("Alice"), Value::Float(50000.0)]]);
}

/// A header-only or empty table decodes to no rows.
#[test]
fn test_decode_header_only() {
    assert!(decode_rows(&employees(), &raw(&[&["Name", "Salary"]])).unwrap().is_empty());
    assert!(decode_rows(&employees(), &[]).unwrap().is_empty());
}

/// Every supported type decodes from its textual form.
#[test]
fn test_decode_all_types() {
    let table = raw(&[
        &["name", "age", "birthday", "createdAt"],
        &["John", "30", "1987-03-14", "2017-06-01 09:30:00"],
        &["Karl", "", "", "2017-06-05T10:00:00Z"],
    ]);

    let rows = decode_rows(&contacts(), &table).unwrap();
    let created = NaiveDate::from_ymd_opt(2017, 6, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    assert_eq!(rows[0][0], Value::from("John"));
    assert_eq!(rows[0][1], Value::Int(30));
    assert_eq!(rows[0][2], Value::Date(NaiveDate::from_ymd_opt(1987, 3, 14).unwrap()));
    assert_eq!(rows[0][3], Value::Timestamp(created));
    assert_eq!(rows[1][1], Value::Null);
    assert_eq!(rows[1][2], Value::Null);
}

/// Invalid optional numbers decode to null instead of failing.
#[test]
fn test_optional_numeric_null() {
    let table = raw(&[
        &["name", "age", "birthday", "createdAt"],
        &["John", "unknown", "", "2017-06-01"],
    ]);
    let rows = decode_rows(&contacts(), &table).unwrap();
    assert!(rows[0][1].is_null());
}

/// Required timestamp rejects unparsable text.
#[test]
fn test_required_timestamp_invalid() {
    let table = raw(&[
        &["name", "age", "birthday", "createdAt"],
        &["John", "1", "", "yesterday"],
    ]);
    let err = decode_rows(&contacts(), &table).unwrap_err();
    assert_eq!(
        err.to_string(),
        "0:3: createdAt: TimeStamp value of \"yesterday\" is not valid for this field"
    );
}

// =============================================================================
// Row Length Tests
// =============================================================================

/// A cell past the last column has no schema.
#[test]
fn test_row_longer_than_schema() {
    let row: RawRow = vec!["Alice".into(), "1".into(), "surplus".into()];
    let err = process_row::<Decode>(&employees(), &row).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::SchemaMismatch);
    assert_eq!(err.to_string(), "2: No schema found for cell with value \"surplus\"");
}

/// A row shorter than the schema fails at the first uncovered column.
#[test]
fn test_row_shorter_than_schema() {
    let row: RawRow = vec!["Alice".into()];
    let err = process_row::<Decode>(&employees(), &row).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::SchemaMismatch);
    assert_eq!(err.to_string(), "1: Salary: No value found for cell");
}

/// Cell processing without a column never runs a type operation.
#[test]
fn test_cell_without_column() {
    let err = process_cell::<Encode>(None, &Value::Int(7)).unwrap_err();
    assert_eq!(err.to_string(), "No schema found for cell with value \"7\"");
}

// =============================================================================
// String Constraint Tests
// =============================================================================

/// Length limit N accepts N characters and rejects N + 1.
#[test]
fn test_max_length_boundary() {
    let schema = Schema::new("notes", vec![Column::new("text", FieldDef::string(true, 5))]);

    let ok = decode_rows(&schema, &raw(&[&["text"], &["héllo"]])).unwrap();
    assert_eq!(ok[0][0], Value::from("héllo"));

    let err = decode_rows(&schema, &raw(&[&["text"], &["hello!"]])).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::ConstraintViolation);
    assert_eq!(
        err.to_string(),
        "0:0: text: String value exceeds maximum length of 5: hello!"
    );
}

/// Required string rejects empty text.
#[test]
fn test_required_string_empty() {
    let err = decode_rows(&employees(), &raw(&[&["Name", "Salary"], &["", "1"]])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "0:0: Name: String value required but nothing was given"
    );
}

// =============================================================================
// Table Encoding Tests
// =============================================================================

/// Encoded table starts with the column names.
#[test]
fn test_encode_prepends_header() {
    let rows = vec![
        vec![Value::from("Alice"), Value::Float(50000.0)],
        vec![Value::from("Bob"), Value::Float(42000.5)],
    ];
    let encoded = encode_rows(&employees(), &rows).unwrap();
    assert_eq!(
        encoded,
        raw(&[&["Name", "Salary"], &["Alice", "50000"], &["Bob", "42000.5"]])
    );
}

/// Encoding no rows yields just the header.
#[test]
fn test_encode_empty_table() {
    assert_eq!(encode_rows(&employees(), &[]).unwrap(), raw(&[&["Name", "Salary"]]));
}

/// A missing required value fails the whole table, without a header.
#[test]
fn test_encode_required_missing() {
    let rows = vec![
        vec![Value::from("Alice"), Value::Float(1.0)],
        vec![Value::from("Bob"), Value::Null],
    ];
    let err = encode_rows(&employees(), &rows).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::RequiredValueMissing);
    assert_eq!(err.to_string(), "1:1: Salary: Float value required and not set.");
}

/// decode then encode reproduces canonical text.
#[test]
fn test_round_trip_is_stable() {
    let table = raw(&[
        &["name", "age", "birthday", "createdAt"],
        &["John", "30", "1987-03-14", "2017-06-01 09:30:00"],
        &["Karl", "", "1990-01-01", "2017-06-05 00:00:00"],
    ]);

    let decoded = decode_rows(&contacts(), &table).unwrap();
    let encoded = encode_rows(&contacts(), &decoded).unwrap();
    assert_eq!(encoded, table);
}

/// An empty optional date decodes to null but cannot be encoded back.
#[test]
fn test_null_optional_date_does_not_encode() {
    let table = raw(&[
        &["name", "age", "birthday", "createdAt"],
        &["Karl", "", "", "2017-06-05 00:00:00"],
    ]);

    let decoded = decode_rows(&contacts(), &table).unwrap();
    assert!(decoded[0][2].is_null());

    let err = encode_rows(&contacts(), &decoded).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::RequiredValueMissing);
    assert_eq!(err.to_string(), "0:2: birthday: Date value required and not set.");
}

/// Optional numbers encode anything that is not a number as an empty cell.
#[test]
fn test_optional_number_encodes_non_number_as_empty() {
    let rows = vec![vec![
        Value::from("John"),
        Value::from("thirty"),
        Value::Date(NaiveDate::from_ymd_opt(1987, 3, 14).unwrap()),
        Value::Date(NaiveDate::from_ymd_opt(2017, 6, 1).unwrap()),
    ]];

    let encoded = encode_rows(&contacts(), &rows).unwrap();
    assert_eq!(encoded[1], vec!["John", "", "1987-03-14", "2017-06-01 00:00:00"]);
}

/// A blank required number reports the conversion message.
#[test]
fn test_blank_required_number_message() {
    let err = decode_rows(&employees(), &raw(&[&["Name", "Salary"], &["Alice", ""]])).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::RequiredValueMissing);
    assert_eq!(err.to_string(), "0:1: Salary: Cannot convert \"\" to Float.");
}

// =============================================================================
// Determinism Tests
// =============================================================================

/// Same input decodes and fails the same way every time.
#[test]
fn test_processing_is_deterministic() {
    let good = raw(&[&["Name", "Salary"], &["Alice", "50000"]]);
    let bad = raw(&[&["Name", "Salary"], &["Alice", "x"]]);

    let expected = decode_rows(&employees(), &good).unwrap();
    let expected_err = decode_rows(&employees(), &bad).unwrap_err();

    for _ in 0..100 {
        assert_eq!(decode_rows(&employees(), &good).unwrap(), expected);
        assert_eq!(decode_rows(&employees(), &bad).unwrap_err(), expected_err);
    }
}

// =============================================================================
// Deferred Result Tests
// =============================================================================

/// Table operations resolve to the same result as the direct form.
#[tokio::test]
async fn test_deferred_table_operations() {
    let table = raw(&[&["Name", "Salary"], &["Alice", "50000"]]);

    let rows = decode_table(&employees(), &table).await.unwrap();
    assert_eq!(rows, decode_rows(&employees(), &table).unwrap());

    let encoded = encode_table(&employees(), &rows).await.unwrap();
    assert_eq!(encoded, table);

    let bad = raw(&[&["Name", "Salary"], &["Alice", "x"]]);
    assert!(decode_table(&employees(), &bad).await.is_err());
}

// =============================================================================
// Diagnostic Validation Tests
// =============================================================================

/// validate_table lists every failing cell, labeled like decode errors.
#[test]
fn test_validate_table_collects_all() {
    let table = raw(&[
        &["Name", "Salary"],
        &["", "x"],
        &["Bob"],
        &["Carol", "1"],
    ]);

    let errors = validate_table(&employees(), &table);
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "0:0: Name: String value required but nothing was given",
            "0:1: Salary: Cannot convert \"x\" to Float.",
            "1:1: Salary: No value found for cell",
        ]
    );

    assert_eq!(
        decode_rows(&employees(), &table).unwrap_err(),
        errors[0]
    );
}
