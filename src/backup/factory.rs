use crate::backup::domain::BackupService;
use crate::backup::domain::service::BackupServiceImpl;
use crate::backup::reconciler::Reconciler;
use crate::backup::snapshot::SnapshotWriter;
use crate::books::factory::create_book_repository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::gateway::factory::create_remote_catalog;
use crate::utils::sqlite::Database;

pub fn create_backup_service(config: &Configuration, db: &Database) -> LibraryResult<Box<dyn BackupService>> {
    let remote_catalog = create_remote_catalog(config)?;
    let snapshot_writer = SnapshotWriter::new(config.snapshot_path.as_str());
    let reconciler = Reconciler::new(create_book_repository(db));
    Ok(Box::new(BackupServiceImpl::new(remote_catalog, snapshot_writer, reconciler)))
}
