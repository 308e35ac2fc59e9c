//! File-backed key-value store: one JSON object per file.
//!
//! Persistence backend for the developer CLI, where the collection has
//! to survive between invocations. Writes rewrite the whole file; the
//! store-level read-modify-write contract already assumes that.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::KeyValueStore;

/// Errors from the file backend.
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value slots persisted as a single pretty-printed JSON object.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_slots(&self) -> Result<HashMap<String, Value>, FileStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_slots(&self, slots: &HashMap<String, Value>) -> Result<(), FileStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let text = serde_json::to_string_pretty(slots)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    type Error = FileStoreError;

    async fn get(&self, key: &str) -> Result<Option<Value>, Self::Error> {
        Ok(self.read_slots().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Self::Error> {
        let mut slots = self.read_slots().await?;
        slots.insert(key.to_string(), value);
        self.write_slots(&slots).await
    }
}
