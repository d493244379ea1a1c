pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use crate::backup::reconciler::RecordOutcome;
use crate::core::library::LibraryResult;
use crate::utils::date::serializer;

// BackupReport summarises one mirror run of the remote catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackupReport {
    pub snapshot_path: String,
    pub fetched: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<RecordOutcome>,
    #[serde(with = "serializer")]
    pub started_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub finished_at: NaiveDateTime,
}

#[async_trait]
pub trait BackupService: Sync + Send {
    async fn run(&self) -> LibraryResult<BackupReport>;
}
