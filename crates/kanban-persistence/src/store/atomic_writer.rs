use kanban_core::{KanbanError, KanbanResult};
use std::io::Write;
use std::path::Path;
use tokio::fs;

/// Write-to-temp-then-rename file writes, so readers never see a half
/// written document.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Replace the contents of `path` with `data`. Missing parent
    /// directories are created.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        fs::create_dir_all(&parent).await?;

        let target = path.to_path_buf();
        let bytes = data.to_vec();
        // The temp file must live in the target directory so the rename
        // stays on one filesystem.
        tokio::task::spawn_blocking(move || -> KanbanResult<()> {
            let mut temp = tempfile::NamedTempFile::new_in(&parent)?;
            temp.write_all(&bytes)?;
            temp.as_file().sync_all()?;
            temp.persist(&target).map_err(|e| KanbanError::Io(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| KanbanError::Internal(format!("write task failed: {}", e)))??;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a whole file, or `None` if it does not exist.
    pub async fn read_if_exists(path: &Path) -> KanbanResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.json");

        AtomicWriter::write_atomic(&file_path, b"First").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"Second").await.unwrap();

        let read_data = AtomicWriter::read_if_exists(&file_path).await.unwrap();
        assert_eq!(read_data.as_deref(), Some(&b"Second"[..]));
    }

    #[tokio::test]
    async fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested/deeper/test.json");

        AtomicWriter::write_atomic(&file_path, b"{}").await.unwrap();
        assert!(file_path.exists());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let missing = AtomicWriter::read_if_exists(&dir.path().join("nope.json"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
