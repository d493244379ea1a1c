use async_trait::async_trait;
use serde_json::Value;
use crate::core::library::LibraryResult;

// RemoteCatalog is the source of truth mirrored by the backup utility. Records are
// returned untouched so the snapshot keeps exactly what the remote served.
#[async_trait]
pub trait RemoteCatalog: Sync + Send {
    async fn fetch_all(&self) -> LibraryResult<Vec<Value>>;
}
