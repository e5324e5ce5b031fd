//! # In-Memory Backend

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::backend::{validate_path, RawStore};
use super::errors::{StoreError, StoreResult};

/// Store that keeps objects in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with one object
    pub fn with_object(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let mut objects = HashMap::new();
        objects.insert(path.into(), data.into());
        Self {
            objects: RwLock::new(objects),
        }
    }
}

impl RawStore for MemoryBackend {
    async fn read(&self, path: &str) -> StoreResult<Vec<u8>> {
        validate_path(path)?;
        self.objects
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        validate_path(path)?;
        self.objects
            .write()
            .await
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn exists(&self, path: &str) -> StoreResult<bool> {
        validate_path(path)?;
        Ok(self.objects.read().await.contains_key(path))
    }
}
