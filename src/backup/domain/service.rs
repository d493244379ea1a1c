use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use crate::backup::domain::{BackupReport, BackupService};
use crate::backup::reconciler::{ReconcileAction, Reconciler};
use crate::backup::snapshot::SnapshotWriter;
use crate::core::library::LibraryResult;
use crate::gateway::catalog::RemoteCatalog;

pub struct BackupServiceImpl {
    remote_catalog: Box<dyn RemoteCatalog>,
    snapshot_writer: SnapshotWriter,
    reconciler: Reconciler,
}

impl BackupServiceImpl {
    pub fn new(remote_catalog: Box<dyn RemoteCatalog>, snapshot_writer: SnapshotWriter,
               reconciler: Reconciler) -> Self {
        Self {
            remote_catalog,
            snapshot_writer,
            reconciler,
        }
    }
}

#[async_trait]
impl BackupService for BackupServiceImpl {
    // fetch, snapshot, then reconcile; a failure before reconciliation aborts the run
    async fn run(&self) -> LibraryResult<BackupReport> {
        let started_at = Utc::now().naive_utc();
        let records = self.remote_catalog.fetch_all().await?;

        self.snapshot_writer.write(&records).await?;
        let snapshot_path = self.snapshot_writer.path().display().to_string();
        info!(path = snapshot_path.as_str(), books = records.len(), "snapshot saved");

        let report = self.reconciler.reconcile(&records).await?;
        info!(books = records.len(), failed = report.failed(), "books saved to the local database");

        Ok(BackupReport {
            snapshot_path,
            fetched: records.len(),
            inserted: report.count(ReconcileAction::Inserted),
            replaced: report.count(ReconcileAction::Replaced),
            skipped: report.count(ReconcileAction::Skipped),
            failed: report.failed(),
            failures: report.failures(),
            started_at,
            finished_at: Utc::now().naive_utc(),
        })
    }
}
