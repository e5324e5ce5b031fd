//! # Local Filesystem Backend

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;

use super::backend::{validate_path, RawStore};
use super::errors::{StoreError, StoreResult};

/// Filesystem store rooted at a directory
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn full_path(&self, path: &str) -> StoreResult<PathBuf> {
        validate_path(path)?;
        Ok(self.root.join(path))
    }
}

impl RawStore for LocalBackend {
    async fn read(&self, path: &str) -> StoreResult<Vec<u8>> {
        let full_path = self.full_path(path)?;

        fs::read(&full_path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(path.to_string())
            } else {
                StoreError::Io(e.to_string())
            }
        })
    }

    async fn write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        let full_path = self.full_path(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        fs::write(&full_path, data)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn exists(&self, path: &str) -> StoreResult<bool> {
        let full_path = self.full_path(path)?;
        fs::try_exists(&full_path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }
}
