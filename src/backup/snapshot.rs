use std::path::{Path, PathBuf};
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use crate::core::library::LibraryResult;

/// Writes the fetched remote catalog to a JSON file.
///
/// The snapshot is first written to a temporary file next to the destination,
/// flushed to disk and then renamed over it, so a failed write leaves the
/// previous snapshot as it was.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn write(&self, records: &[Value]) -> LibraryResult<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let tmp = self.temp_path();
        if let Err(err) = write_synced(&tmp, &json).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        Ok(())
    }

    pub async fn read(&self) -> LibraryResult<Vec<Value>> {
        let data = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self.path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| "snapshot".to_string());
        let tmp_name = format!(".{}.{}.tmp", name, Uuid::new_v4());
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(tmp_name),
            _ => PathBuf::from(tmp_name),
        }
    }
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    Ok(())
}
