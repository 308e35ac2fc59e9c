//! In-memory key-value backend for tests and development.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use super::KeyValueStore;

/// In-memory slots. Clones share the same underlying map, so several
/// surfaces can point at one "storage area" the way they would share a
/// browser profile. Not suitable for anything that must survive a
/// restart.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    slots: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryKeyValueStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().unwrap().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    type Error = Infallible;

    async fn get(&self, key: &str) -> Result<Option<Value>, Self::Error> {
        Ok(self.slots.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Self::Error> {
        self.slots.write().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}
