//! # Table Storage
//!
//! Flat-file persistence for schema-checked tables.
//!
//! - `RawStore`: async byte storage keyed by relative path
//! - `RawFormat`: bytes to raw rows and back (CSV or JSON)
//! - `TableStore`: read, decode, filter, append and rewrite one table

pub mod backend;
pub mod errors;
pub mod filter;
pub mod format;
pub mod local;
pub mod memory;
pub mod table;

pub use backend::RawStore;
pub use errors::{FilterError, StoreError, StoreResult, TableError, TableResult};
pub use filter::{filter_rows, DateRange};
pub use format::RawFormat;
pub use local::LocalBackend;
pub use memory::MemoryBackend;
pub use table::TableStore;
