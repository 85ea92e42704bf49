use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::KanbanResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata written next to every stored document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceMetadata {
    /// ID of the store instance that performed the save
    pub instance_id: Uuid,
    /// When this document was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Get/set storage of JSON documents by string key.
///
/// This is the only capability the board repository needs from its host:
/// browser local storage, a directory of files and a plain map all fit.
/// Implementations do no merging; `set` overwrites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// The document stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> KanbanResult<Option<serde_json::Value>>;

    async fn set(&self, key: &str, value: serde_json::Value) -> KanbanResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> KanbanResult<()>;
}
