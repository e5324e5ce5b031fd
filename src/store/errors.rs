//! # Store Errors

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for raw store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Raw store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed {format} content: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Date range filter errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid date '{value}' for {bound}: expected YYYY-MM-DD")]
    InvalidDate { bound: &'static str, value: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{0}' is not a date or timestamp column")]
    NotTemporal(String),
}

/// Result type for table store operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors from the table store, wrapping each layer's error
#[derive(Debug, Clone, Error)]
pub enum TableError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Filter(#[from] FilterError),
}
