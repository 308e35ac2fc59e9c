//! The record store: append/list/remove/clear over an ordered tour
//! collection persisted in an opaque key-value collaborator.
//!
//! The whole collection lives under a single slot ([`TOURS_KEY`]) as a
//! JSON array. Every operation is read-modify-write: load the full
//! collection, mutate in memory, write it back. There is no
//! compare-and-swap; two surfaces writing concurrently can race, which
//! is accepted for a single-user tool (see DESIGN.md). All writes in a
//! deployment are expected to funnel through one [`MessageHandler`]
//! instance.
//!
//! [`MessageHandler`]: crate::messages::MessageHandler

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryKeyValueStore;

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::types::{new_tour_id, TourDraft, TourRecord};

/// Slot under which the tour collection is persisted.
pub const TOURS_KEY: &str = "tours";

/// Per-operation deadline for the storage collaborator.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(10);

/// The opaque persistence collaborator: an async key-value store that
/// speaks structured JSON values natively.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a slot. Missing slots are `None`, not an error.
    async fn get(&self, key: &str) -> Result<Option<Value>, Self::Error>;

    /// Replace a slot wholesale.
    async fn set(&self, key: &str, value: Value) -> Result<(), Self::Error>;
}

/// Outcome of a successful append.
#[derive(Debug, Clone)]
pub struct AppendOutcome {
    /// The id assigned to the new record
    pub id: String,

    /// Collection size after the append
    pub count: usize,
}

/// Append/list/remove/clear over the persisted tour collection.
pub struct TourStore<K> {
    kv: K,
    op_timeout: Duration,
}

impl<K: KeyValueStore> TourStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    /// Override the per-operation deadline on the collaborator.
    pub fn with_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    async fn load(&self) -> StoreResult<Vec<TourRecord>> {
        let slot = tokio::time::timeout(self.op_timeout, self.kv.get(TOURS_KEY))
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))?
            .map_err(|e| StoreError::Backend(Box::new(e)))?;

        match slot {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, tours: &[TourRecord]) -> StoreResult<()> {
        let value = serde_json::to_value(tours)?;
        tokio::time::timeout(self.op_timeout, self.kv.set(TOURS_KEY, value))
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))?
            .map_err(|e| StoreError::Backend(Box::new(e)))
    }

    /// Assign id + timestamp, append to the end, persist.
    ///
    /// Duplicates by title/url are allowed; uniqueness is only on id.
    pub async fn append(&self, draft: TourDraft) -> StoreResult<AppendOutcome> {
        let mut tours = self.load().await?;

        let id = new_tour_id();
        tours.push(draft.into_record(id.clone(), Utc::now()));
        self.persist(&tours).await?;

        tracing::info!(id = %id, count = tours.len(), "tour appended");
        Ok(AppendOutcome {
            id,
            count: tours.len(),
        })
    }

    /// The full collection in insertion order; empty if nothing is
    /// persisted yet.
    pub async fn list(&self) -> StoreResult<Vec<TourRecord>> {
        self.load().await
    }

    /// Remove by id (canonical string comparison) and return the new
    /// count. An unknown id is a no-op, not an error.
    pub async fn remove(&self, id: &str) -> StoreResult<usize> {
        let mut tours = self.load().await?;
        let before = tours.len();

        tours.retain(|tour| tour.id != id);
        self.persist(&tours).await?;

        if tours.len() == before {
            tracing::debug!(id = %id, "remove matched no tour");
        } else {
            tracing::info!(id = %id, count = tours.len(), "tour removed");
        }
        Ok(tours.len())
    }

    /// Replace the collection with an empty one.
    pub async fn clear(&self) -> StoreResult<()> {
        self.persist(&[]).await?;
        tracing::info!("tour collection cleared");
        Ok(())
    }
}
