//! centrus - schema-driven table codec for a flat-file CRM backend
//!
//! Tables are stored as rows of strings with a header row. A `Schema`
//! describes each column's type and constraints; the schema processors
//! decode raw rows into typed `Value`s and encode them back, failing on
//! the first bad cell with a `"<row>:<cell>: <column>: <message>"` error.
//!
//! - `schema`: field types, values, cell/row/table processing, schema files
//! - `store`: byte storage, CSV/JSON layout, the `TableStore` facade
//! - `config`: store configuration file
//! - `observability`: structured JSON-line logging

pub mod config;
pub mod observability;
pub mod schema;
pub mod store;
