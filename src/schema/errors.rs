//! Schema error types
//!
//! Error codes:
//! - SCHEMA_MISMATCH: a cell has no matching column (or a column no cell)
//! - REQUIRED_VALUE_MISSING: required value absent or empty
//! - TYPE_CONVERSION: value present but not convertible to the column type
//! - CONSTRAINT_VIOLATION: value convertible but violates a column constraint
//! - MALFORMED_SCHEMA: the schema definition itself is invalid
//!
//! Codec failures are labeled as they travel up from the cell to the table.
//! `Display` renders the layered form `<row>:<cell>: <column>: <message>`,
//! which log consumers match on.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Cell position has no schema column, or column has no cell
    SchemaMismatch,
    /// Required value absent or empty
    RequiredValueMissing,
    /// Value cannot be converted to the declared type
    TypeConversion,
    /// Value violates a declared constraint
    ConstraintViolation,
    /// Schema definition is invalid
    MalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::SchemaMismatch => "SCHEMA_MISMATCH",
            SchemaErrorCode::RequiredValueMissing => "REQUIRED_VALUE_MISSING",
            SchemaErrorCode::TypeConversion => "TYPE_CONVERSION",
            SchemaErrorCode::ConstraintViolation => "CONSTRAINT_VIOLATION",
            SchemaErrorCode::MalformedSchema => "MALFORMED_SCHEMA",
        }
    }

    /// Whether this error describes bad data rather than a bad schema
    pub fn is_data_error(&self) -> bool {
        !matches!(self, SchemaErrorCode::MalformedSchema)
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with the context gathered on the way up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Error code
    code: SchemaErrorCode,
    /// Underlying message, without location prefixes
    message: String,
    /// Column name, set by the cell processor
    column: Option<String>,
    /// Zero-based cell index, set by the row processor
    cell: Option<usize>,
    /// Zero-based row index (header excluded), set by the table processor
    row: Option<usize>,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            column: None,
            cell: None,
            row: None,
        }
    }

    /// Create an error for a cell that has no schema column
    pub fn no_schema_for(value: impl fmt::Display) -> Self {
        Self::new(
            SchemaErrorCode::SchemaMismatch,
            format!("No schema found for cell with value \"{}\"", value),
        )
    }

    /// Create an error for a column that has no cell in the row
    pub fn missing_cell() -> Self {
        Self::new(SchemaErrorCode::SchemaMismatch, "No value found for cell")
    }

    /// Create a required value missing error
    pub fn required_missing(message: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::RequiredValueMissing, message)
    }

    /// Create a type conversion error
    pub fn type_conversion(message: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::TypeConversion, message)
    }

    /// Create a constraint violation error
    pub fn constraint_violation(message: impl Into<String>) -> Self {
        Self::new(SchemaErrorCode::ConstraintViolation, message)
    }

    /// Create an error for a malformed schema definition
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            SchemaErrorCode::MalformedSchema,
            format!("Malformed schema '{}': {}", path.into(), reason.into()),
        )
    }

    /// Label with the column name
    pub fn in_column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    /// Label with the cell index
    pub fn at_cell(mut self, index: usize) -> Self {
        self.cell = Some(index);
        self
    }

    /// Label with the row index
    pub fn at_row(mut self, index: usize) -> Self {
        self.row = Some(index);
        self
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the underlying message, without location prefixes
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn cell(&self) -> Option<usize> {
        self.cell
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "{}:", row)?;
        }
        if let Some(cell) = self.cell {
            write!(f, "{}: ", cell)?;
        }
        if let Some(column) = &self.column {
            write!(f, "{}: ", column)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
