//! Cell, row and table processing against a schema
//!
//! Processing is fail-fast at every level:
//! - a cell failure is labeled with its column name
//! - the row stops at its first failing cell and labels it with the cell index
//! - the table stops at its first failing row and labels it with the row index
//!
//! Decoding strips the header row before processing; encoding prepends one
//! built from the column names once every row succeeded. The table
//! operations hand back an already-resolved future so they chain with
//! async store I/O.

use std::fmt;
use std::future::{ready, Ready};

use super::errors::{SchemaError, SchemaResult};
use super::types::{Column, FieldDef, Schema};
use super::value::Value;

/// Raw textual row, as read from or written to a store
pub type RawRow = Vec<String>;

/// Typed row
pub type Row = Vec<Value>;

/// Direction of a cell operation
pub trait CellOp {
    type Input: fmt::Display;
    type Output;

    fn apply(field: &FieldDef, input: &Self::Input) -> SchemaResult<Self::Output>;
}

/// Raw text to typed value
pub struct Decode;

/// Typed value to raw text
pub struct Encode;

impl CellOp for Decode {
    type Input = String;
    type Output = Value;

    fn apply(field: &FieldDef, input: &String) -> SchemaResult<Value> {
        field.decode(input)
    }
}

impl CellOp for Encode {
    type Input = Value;
    type Output = String;

    fn apply(field: &FieldDef, input: &Value) -> SchemaResult<String> {
        field.encode(input)
    }
}

/// Applies `O` to one cell. A cell with no column is a mismatch, and the
/// type operation is not run for it.
pub fn process_cell<O: CellOp>(column: Option<&Column>, value: &O::Input) -> SchemaResult<O::Output> {
    let column = column.ok_or_else(|| SchemaError::no_schema_for(value))?;
    O::apply(&column.field, value).map_err(|e| e.in_column(&column.name))
}

/// Applies `O` to every cell of a row, stopping at the first failure.
///
/// Cells past the end of the schema fail as mismatches. A row shorter than
/// the schema fails at the first column left without a cell.
pub fn process_row<O: CellOp>(schema: &Schema, row: &[O::Input]) -> SchemaResult<Vec<O::Output>> {
    let cells = row
        .iter()
        .enumerate()
        .map(|(index, value)| {
            process_cell::<O>(schema.column(index), value).map_err(|e| e.at_cell(index))
        })
        .collect::<SchemaResult<Vec<_>>>()?;

    if let Some(column) = schema.column(row.len()) {
        return Err(SchemaError::missing_cell()
            .in_column(&column.name)
            .at_cell(row.len()));
    }

    Ok(cells)
}

/// Applies `O` to every row, stopping at the first failing row.
pub fn process_table<O, R>(schema: &Schema, rows: &[R]) -> SchemaResult<Vec<Vec<O::Output>>>
where
    O: CellOp,
    R: AsRef<[O::Input]>,
{
    rows.iter()
        .enumerate()
        .map(|(index, row)| process_row::<O>(schema, row.as_ref()).map_err(|e| e.at_row(index)))
        .collect()
}

/// Prepends the header row built from the schema's column names.
pub fn add_headers(schema: &Schema, rows: Vec<RawRow>) -> Vec<RawRow> {
    let mut table = Vec::with_capacity(rows.len() + 1);
    table.push(schema.column_names());
    table.extend(rows);
    table
}

/// Drops the first row, whatever it holds.
pub fn remove_headers<T>(rows: &[T]) -> &[T] {
    rows.get(1..).unwrap_or(&[])
}

/// Decodes a raw table, header row included, into typed rows.
pub fn decode_rows(schema: &Schema, rows: &[RawRow]) -> SchemaResult<Vec<Row>> {
    process_table::<Decode, _>(schema, remove_headers(rows))
}

/// Encodes typed rows into a raw table with a header row.
pub fn encode_rows(schema: &Schema, rows: &[Row]) -> SchemaResult<Vec<RawRow>> {
    process_table::<Encode, _>(schema, rows).map(|encoded| add_headers(schema, encoded))
}

/// Deferred form of [`decode_rows`], resolved on creation.
pub fn decode_table(schema: &Schema, rows: &[RawRow]) -> Ready<SchemaResult<Vec<Row>>> {
    ready(decode_rows(schema, rows))
}

/// Deferred form of [`encode_rows`], resolved on creation.
pub fn encode_table(schema: &Schema, rows: &[Row]) -> Ready<SchemaResult<Vec<RawRow>>> {
    ready(encode_rows(schema, rows))
}

/// Collects every failing cell of a raw table instead of stopping at the
/// first one. The header row is skipped as in [`decode_rows`].
///
/// This is a diagnostic pass; [`decode_rows`] stays fail-fast.
pub fn validate_table(schema: &Schema, rows: &[RawRow]) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    for (row_index, row) in remove_headers(rows).iter().enumerate() {
        for (cell_index, value) in row.iter().enumerate() {
            if let Err(e) = process_cell::<Decode>(schema.column(cell_index), value) {
                errors.push(e.at_cell(cell_index).at_row(row_index));
            }
        }

        for (cell_index, column) in schema.columns.iter().enumerate().skip(row.len()) {
            errors.push(
                SchemaError::missing_cell()
                    .in_column(&column.name)
                    .at_cell(cell_index)
                    .at_row(row_index),
            );
        }
    }

    errors
}
