//! Schema loader for table schemas kept on disk
//!
//! - One JSON file per table schema under the schema directory
//! - Files are read once at startup into an in-memory registry
//! - A malformed file or a duplicate table name aborts loading

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Reads schema files from disk and keeps them by table name.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by table name
    schemas: HashMap<String, Schema>,
}

impl SchemaLoader {
    /// Creates a loader over the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// A missing directory is created and leaves the registry empty.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        let dir = self.schema_dir.display().to_string();

        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::malformed_schema(&dir, format!("Failed to create schema directory: {}", e))
            })?;
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(&dir, format!("Failed to read schema directory: {}", e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(&dir, format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        // Directory order is platform dependent
        paths.sort();
        for path in &paths {
            self.load_schema_file(path)?;
        }

        let count = self.schemas.len().to_string();
        log_event_with_fields(Event::SchemasLoaded, &[("count", &count), ("dir", &dir)]);

        Ok(())
    }

    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let display = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(&display, format!("Failed to read file: {}", e))
        })?;

        let schema: Schema = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed_schema(&display, format!("Invalid JSON: {}", e)))?;

        self.insert(schema, &display)
    }

    /// Registers a schema directly (for tests or programmatic tables).
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        self.insert(schema, "<in-memory>")
    }

    fn insert(&mut self, schema: Schema, origin: &str) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(origin, e))?;

        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::malformed_schema(
                origin,
                format!("Table '{}' is already defined", schema.name),
            ));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Gets a schema by table name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns all loaded schemas.
    pub fn all_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes a schema to `<schema_dir>/<name>.json`, refusing to overwrite.
    pub fn save_schema(&self, schema: &Schema) -> SchemaResult<PathBuf> {
        let path = self.schema_dir.join(format!("{}.json", schema.name));
        let display = path.display().to_string();

        if path.exists() {
            return Err(SchemaError::malformed_schema(
                &display,
                format!("Table '{}' is already defined", schema.name),
            ));
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(&display, format!("Failed to create schema directory: {}", e))
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(&display, format!("Failed to serialize schema: {}", e))
        })?;

        fs::write(&path, content)
            .map_err(|e| SchemaError::malformed_schema(&display, format!("Failed to write file: {}", e)))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, FieldDef, SchemaErrorCode};
    use tempfile::TempDir;

    fn sample_schema() -> Schema {
        Schema::new(
            "contacts",
            vec![
                Column::new("name", FieldDef::string(true, 80)),
                Column::new("createdAt", FieldDef::timestamp(true)),
            ],
        )
    }

    #[test]
    fn test_register_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema()).unwrap();

        let schema = loader.get("contacts").unwrap();
        assert_eq!(schema.columns.len(), 2);
        assert!(loader.exists("contacts"));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema()).unwrap();

        let err = loader.register(sample_schema()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
        assert!(err.message().contains("already defined"));
    }

    #[test]
    fn test_invalid_structure_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        let result = loader.register(Schema::new("empty", vec![]));
        assert!(result.is_err());
        assert_eq!(loader.schema_count(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());

        let path = loader.save_schema(&sample_schema()).unwrap();
        assert!(path.ends_with("contacts.json"));
        assert!(loader.save_schema(&sample_schema()).is_err());

        let mut reloaded = SchemaLoader::new(temp_dir.path());
        reloaded.load_all().unwrap();

        assert_eq!(reloaded.get("contacts"), Some(&sample_schema()));
    }

    #[test]
    fn test_malformed_file_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{ not json").unwrap();

        let mut loader = SchemaLoader::new(temp_dir.path());
        let err = loader.load_all().unwrap_err();
        assert!(err.message().contains("Invalid JSON"));
    }

    #[test]
    fn test_non_json_files_skipped() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README.txt"), "notes").unwrap();

        let mut loader = SchemaLoader::new(temp_dir.path());
        loader.load_all().unwrap();
        assert_eq!(loader.schema_count(), 0);
    }

    #[test]
    fn test_missing_directory_created() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("schemas");

        let mut loader = SchemaLoader::new(&dir);
        loader.load_all().unwrap();
        assert!(dir.is_dir());
        assert_eq!(loader.schema_count(), 0);
    }
}
