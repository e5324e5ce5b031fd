//! # Raw Store Trait
//!
//! Byte-level storage keyed by a relative path. The table store layers
//! parsing and schema processing on top.

use std::future::Future;
use std::path::{Component, Path};

use super::errors::{StoreError, StoreResult};

/// Asynchronous byte store
pub trait RawStore: Send + Sync + std::fmt::Debug {
    /// Read the whole object at path
    fn read(&self, path: &str) -> impl Future<Output = StoreResult<Vec<u8>>> + Send;

    /// Replace the object at path
    fn write(&self, path: &str, data: &[u8]) -> impl Future<Output = StoreResult<()>> + Send;

    /// Check if path exists
    fn exists(&self, path: &str) -> impl Future<Output = StoreResult<bool>> + Send;
}

/// Accepts non-empty relative paths that stay below the store root.
pub fn validate_path(path: &str) -> StoreResult<()> {
    if path.is_empty() {
        return Err(StoreError::InvalidPath("empty path".into()));
    }

    let escapes = Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(StoreError::InvalidPath(path.to_string()));
    }

    Ok(())
}
