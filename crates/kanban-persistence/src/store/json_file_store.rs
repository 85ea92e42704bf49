use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{KeyValueStore, PersistenceMetadata};
use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const FORMAT_VERSION: u32 = 1;

/// Directory-backed key/value store: one pretty-printed JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    instance_id: Uuid,
}

/// On-disk wrapper around every stored document
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: serde_json::Value,
}

impl JsonFileStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            instance_id: Uuid::new_v4(),
        }
    }

    /// Create a store with a specific instance ID (useful for testing)
    pub fn with_instance_id(root: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            instance_id,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds `key`. Characters outside `[A-Za-z0-9._-]` are
    /// percent-encoded, so distinct keys always map to distinct files.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }

    /// Read the full envelope for `key`, including metadata.
    pub async fn load_envelope(&self, key: &str) -> KanbanResult<Option<JsonEnvelope>> {
        let path = self.path_for(key);
        let Some(bytes) = AtomicWriter::read_if_exists(&path).await? else {
            return Ok(None);
        };
        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| KanbanError::Serialization(format!("{}: {}", path.display(), e)))?;
        if envelope.version != FORMAT_VERSION {
            return Err(KanbanError::Serialization(format!(
                "Unsupported format version {} in {}",
                envelope.version,
                path.display()
            )));
        }
        Ok(Some(envelope))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> KanbanResult<Option<serde_json::Value>> {
        Ok(self.load_envelope(key).await?.map(|envelope| envelope.data))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> KanbanResult<()> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(self.instance_id),
            data: value,
        };
        let json_bytes = serde_json::to_vec_pretty(&envelope)?;
        let path = self.path_for(key);
        AtomicWriter::write_atomic(&path, &json_bytes).await?;

        tracing::info!("Saved {} bytes to {}", json_bytes.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> KanbanResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    // Leading dots would produce hidden files or `..`.
    if encoded.starts_with('.') {
        encoded.replace_range(0..1, "%2E");
    }
    encoded
}
