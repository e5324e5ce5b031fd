//! Schema subsystem for centrus
//!
//! A schema is an ordered list of named column descriptors. Each descriptor
//! knows how to encode a typed value into its on-disk text and decode it
//! back. Tables are processed cell by cell, row by row, against the schema.
//!
//! # Design Principles
//!
//! - Column order is cell order
//! - Fail fast: the first bad cell fails its row, the first bad row its table
//! - Errors carry row, cell and column context
//! - Pure and deterministic: no I/O, no shared state

mod codec;
mod errors;
mod loader;
mod processor;
mod types;
mod value;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use processor::{
    add_headers, decode_rows, decode_table, encode_rows, encode_table, process_cell, process_row,
    process_table, remove_headers, validate_table, CellOp, Decode, Encode, RawRow, Row,
};
pub use types::{Column, FieldDef, FieldType, Schema};
pub use value::Value;
