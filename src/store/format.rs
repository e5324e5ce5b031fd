//! # Raw Table Formats
//!
//! Converts file bytes to raw rows and back. No header handling happens
//! here: the header is just the first row. Rows may have any length;
//! length mismatches are reported by schema processing.

use serde::{Deserialize, Serialize};

use crate::schema::RawRow;

use super::errors::{StoreError, StoreResult};

/// On-disk layout of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawFormat {
    /// Comma-separated values, one record per line
    #[default]
    Csv,
    /// JSON array of string arrays
    Json,
}

impl RawFormat {
    pub fn name(&self) -> &'static str {
        match self {
            RawFormat::Csv => "csv",
            RawFormat::Json => "json",
        }
    }

    /// File extension used for tables in this format
    pub fn extension(&self) -> &'static str {
        self.name()
    }

    /// Splits file content into raw rows
    pub fn parse(&self, content: &[u8]) -> StoreResult<Vec<RawRow>> {
        match self {
            RawFormat::Csv => parse_csv(content),
            RawFormat::Json => parse_json(content),
        }
    }

    /// Joins raw rows into file content
    pub fn stringify(&self, rows: &[RawRow]) -> StoreResult<Vec<u8>> {
        match self {
            RawFormat::Csv => stringify_csv(rows),
            RawFormat::Json => stringify_json(rows),
        }
    }
}

fn malformed(format: RawFormat, e: impl std::fmt::Display) -> StoreError {
    StoreError::Malformed {
        format: format.name(),
        message: e.to_string(),
    }
}

fn parse_csv(content: &[u8]) -> StoreResult<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| malformed(RawFormat::Csv, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn stringify_csv(rows: &[RawRow]) -> StoreResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| malformed(RawFormat::Csv, e))?;
    }

    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.to_string()))
}

fn parse_json(content: &[u8]) -> StoreResult<Vec<RawRow>> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(content).map_err(|e| malformed(RawFormat::Json, e))
}

fn stringify_json(rows: &[RawRow]) -> StoreResult<Vec<u8>> {
    let mut content = serde_json::to_vec_pretty(rows).map_err(|e| malformed(RawFormat::Json, e))?;
    content.push(b'\n');
    Ok(content)
}
