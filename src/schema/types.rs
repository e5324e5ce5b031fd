//! Schema type definitions
//!
//! Supported column types:
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - string: UTF-8 string with an optional maximum length
//! - date: calendar date (UTC)
//! - timestamp: date and time to the second (UTC)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Supported column types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// UTF-8 string
    String {
        /// Maximum length in characters, unbounded if absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Calendar date
    Date,
    /// Date and time, second resolution
    Timestamp,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::String { .. } => "String",
            FieldType::Date => "Date",
            FieldType::Timestamp => "TimeStamp",
        }
    }

    /// Whether values of this type carry a date
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::Timestamp)
    }
}

/// Field type descriptor: a column type plus its requiredness.
///
/// Built once per schema definition and reused for every cell of its
/// column. The encode/decode rules live in `codec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether a value must be present
    #[serde(default)]
    pub required: bool,
}

impl FieldDef {
    /// Create an int field
    pub fn int(required: bool) -> Self {
        Self {
            field_type: FieldType::Int,
            required,
        }
    }

    /// Create a float field
    pub fn float(required: bool) -> Self {
        Self {
            field_type: FieldType::Float,
            required,
        }
    }

    /// Create a string field limited to `max_length` characters
    pub fn string(required: bool, max_length: usize) -> Self {
        Self {
            field_type: FieldType::String {
                max_length: Some(max_length),
            },
            required,
        }
    }

    /// Create a string field with no length limit
    pub fn unbounded_string(required: bool) -> Self {
        Self {
            field_type: FieldType::String { max_length: None },
            required,
        }
    }

    /// Create a date field
    pub fn date(required: bool) -> Self {
        Self {
            field_type: FieldType::Date,
            required,
        }
    }

    /// Create a timestamp field
    pub fn timestamp(required: bool) -> Self {
        Self {
            field_type: FieldType::Timestamp,
            required,
        }
    }
}

/// One named column of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, also used as the header cell
    pub name: String,
    /// Column descriptor
    #[serde(flatten)]
    pub field: FieldDef,
}

impl Column {
    pub fn new(name: impl Into<String>, field: FieldDef) -> Self {
        Self {
            name: name.into(),
            field,
        }
    }
}

/// Ordered table schema. Column index maps to cell index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Table name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Column definitions, in cell order
    pub columns: Vec<Column>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            description: None,
            columns,
        }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column at a cell position
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Position and definition of a column by name
    pub fn find(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, column)| column.name == name)
    }

    /// Column names in order, as used for the header row
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Validates the schema structure itself (not a table)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Schema name must not be empty".into());
        }

        if self.columns.is_empty() {
            return Err(format!("Schema '{}' must define at least one column", self.name));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() {
                return Err(format!("Schema '{}' has a column without a name", self.name));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(format!("Duplicate column '{}'", column.name));
            }
            if let FieldType::String {
                max_length: Some(0),
            } = column.field.field_type
            {
                return Err(format!("Column '{}' has a max_length of 0", column.name));
            }
        }

        Ok(())
    }
}
