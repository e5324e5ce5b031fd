//! # Table Store
//!
//! One schema-checked table in one backing file. Reads decode the whole
//! file; `add` re-encodes the whole table with the new row and rewrites
//! the file. Nothing is written unless every row encodes.

use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{decode_table, encode_table, validate_table, RawRow, Row, Schema, SchemaError};

use super::backend::RawStore;
use super::errors::{StoreError, TableError, TableResult};
use super::filter::{filter_rows, DateRange};
use super::format::RawFormat;
use super::local::LocalBackend;

/// Schema-checked table stored in a single file
#[derive(Debug)]
pub struct TableStore<B: RawStore> {
    backend: B,
    schema: Schema,
    path: String,
    format: RawFormat,
    /// Serializes read-modify-write cycles of `add`
    write_lock: Mutex<()>,
}

impl TableStore<LocalBackend> {
    /// Opens the table named by the schema under the configured data dir.
    pub fn open(config: &StoreConfig, schema: Schema) -> Self {
        let path = config.table_file(&schema.name);
        Self::new(LocalBackend::new(&config.data_dir), schema, path, config.format)
    }
}

impl<B: RawStore> TableStore<B> {
    pub fn new(backend: B, schema: Schema, path: impl Into<String>, format: RawFormat) -> Self {
        Self {
            backend,
            schema,
            path: path.into(),
            format,
            write_lock: Mutex::new(()),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn format(&self) -> RawFormat {
        self.format
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads and splits the backing file, header row included.
    pub async fn read_raw(&self) -> TableResult<Vec<RawRow>> {
        let content = self.backend.read(&self.path).await?;
        let rows = self.format.parse(&content)?;

        let count = rows.len().to_string();
        log_event_with_fields(Event::TableRead, &[("path", &self.path), ("rows", &count)]);

        Ok(rows)
    }

    /// Decodes every row of the table.
    ///
    /// # Errors
    ///
    /// - `TableError::Store` if the file is missing, unreadable or malformed
    /// - `TableError::Schema` for the first row that fails to decode
    pub async fn get_all(&self) -> TableResult<Vec<Row>> {
        let raw = self.read_raw().await?;
        self.decode(&raw).await
    }

    async fn decode(&self, raw: &[RawRow]) -> TableResult<Vec<Row>> {
        match decode_table(&self.schema, raw).await {
            Ok(rows) => {
                let count = rows.len().to_string();
                log_event_with_fields(Event::TableDecoded, &[("path", &self.path), ("rows", &count)]);
                Ok(rows)
            }
            Err(e) => {
                let message = e.to_string();
                log_event_with_fields(
                    Event::TableDecodeFailed,
                    &[("path", &self.path), ("error", &message)],
                );
                Err(e.into())
            }
        }
    }

    /// Like `get_all`, but a missing file is an empty table.
    async fn get_all_or_empty(&self) -> TableResult<Vec<Row>> {
        match self.read_raw().await {
            Ok(raw) => self.decode(&raw).await,
            Err(TableError::Store(StoreError::NotFound(_))) => {
                log_event_with_fields(Event::TableMissing, &[("path", &self.path)]);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Encodes `rows` with a header row and replaces the backing file.
    pub async fn save_all(&self, rows: &[Row]) -> TableResult<()> {
        let raw = match encode_table(&self.schema, rows).await {
            Ok(raw) => raw,
            Err(e) => {
                let message = e.to_string();
                log_event_with_fields(
                    Event::TableEncodeFailed,
                    &[("path", &self.path), ("error", &message)],
                );
                return Err(e.into());
            }
        };

        let content = self.format.stringify(&raw)?;
        self.backend.write(&self.path, &content).await?;

        let count = rows.len().to_string();
        log_event_with_fields(Event::TableWritten, &[("path", &self.path), ("rows", &count)]);
        Ok(())
    }

    /// Appends a row and rewrites the table.
    ///
    /// A missing file is created. If any row, old or new, fails to encode,
    /// the file is left untouched.
    pub async fn add(&self, row: Row) -> TableResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut rows = self.get_all_or_empty().await?;
        rows.push(row);
        self.save_all(&rows).await?;

        let index = (rows.len() - 1).to_string();
        log_event_with_fields(Event::RowAppended, &[("path", &self.path), ("row", &index)]);
        Ok(())
    }

    /// Rows whose `column` date lies within `range`.
    pub async fn query(&self, column: &str, range: &DateRange) -> TableResult<Vec<Row>> {
        let rows = self.get_all().await?;
        let total = rows.len();
        let matched = filter_rows(&self.schema, rows, column, range)?;

        let total = total.to_string();
        let kept = matched.len().to_string();
        log_event_with_fields(
            Event::TableQueried,
            &[("column", column), ("kept", &kept), ("path", &self.path), ("rows", &total)],
        );

        Ok(matched)
    }

    /// Every decode failure in the file, not just the first.
    pub async fn validate(&self) -> TableResult<Vec<SchemaError>> {
        let raw = self.read_raw().await?;
        let errors = validate_table(&self.schema, &raw);

        for error in &errors {
            let message = error.to_string();
            log_event_with_fields(
                Event::TableValidationError,
                &[("error", &message), ("path", &self.path)],
            );
        }

        Ok(errors)
    }
}
