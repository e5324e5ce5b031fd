//! Observable events for centrus
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Schemas loaded
    SchemasLoaded,

    // Store reads
    /// Raw table read from the backing file
    TableRead,
    /// Backing file does not exist yet
    TableMissing,
    /// Raw table decoded against its schema
    TableDecoded,
    /// Decode rejected the table
    TableDecodeFailed,

    // Store writes
    /// Encode rejected the table
    TableEncodeFailed,
    /// Raw table written to the backing file
    TableWritten,
    /// Row appended to a table
    RowAppended,

    // Queries
    /// Date range filter applied
    TableQueried,
    /// A cell failed table validation
    TableValidationError,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",

            Event::TableRead => "TABLE_READ",
            Event::TableMissing => "TABLE_MISSING",
            Event::TableDecoded => "TABLE_DECODED",
            Event::TableDecodeFailed => "TABLE_DECODE_FAILED",

            Event::TableEncodeFailed => "TABLE_ENCODE_FAILED",
            Event::TableWritten => "TABLE_WRITTEN",
            Event::RowAppended => "ROW_APPENDED",

            Event::TableQueried => "TABLE_QUERIED",
            Event::TableValidationError => "TABLE_VALIDATION_ERROR",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::TableDecodeFailed | Event::TableEncodeFailed)
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TableDecodeFailed | Event::TableEncodeFailed => Severity::Error,
            Event::TableValidationError => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
