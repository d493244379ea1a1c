use std::process::ExitCode;
use tracing::{error, info};
use biblioteca::backup::factory::create_backup_service;
use biblioteca::core::domain::Configuration;
use biblioteca::core::library::LibraryResult;
use biblioteca::core::repository::RepositoryStore;
use biblioteca::utils::sqlite::{setup_tracing, Database};

// One-shot mirror of the remote catalog: snapshot file first, then the local database.
#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "backup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> LibraryResult<()> {
    let config = Configuration::load()?;
    let db = Database::open(RepositoryStore::Sqlite, &config).await?;

    let res = match create_backup_service(&config, &db) {
        Ok(svc) => svc.run().await,
        Err(err) => Err(err),
    };
    db.close().await;

    let report = res?;
    info!(report = serde_json::to_string(&report)?.as_str(), "backup completed");
    Ok(())
}
