use std::path::Path;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use tracing::{instrument, warn};
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RepositoryStore;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
// writes are sequential, the extra connections only serve concurrent reads
const MAX_CONNECTIONS: u32 = 4;

/// Process-wide handle on the SQLite catalog database.
///
/// Cloning is cheap and shares the underlying pool. The handle is opened
/// explicitly at startup and must be closed explicitly by one-shot runs.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn new(options: SqliteConnectOptions, max: u32) -> LibraryResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Opens (creating if missing) the database file at `path`.
    pub async fn connect(path: impl AsRef<Path>) -> LibraryResult<Self> {
        let options = Self::base_options().filename(path.as_ref()).create_if_missing(true);
        Self::new(options, MAX_CONNECTIONS).await
    }

    /// In-memory database limited to one connection, otherwise every pooled
    /// connection would see its own empty database.
    pub async fn connect_in_memory() -> LibraryResult<Self> {
        let options = Self::base_options().filename(":memory:");
        Self::new(options, 1).await
    }

    pub async fn open(store: RepositoryStore, config: &Configuration) -> LibraryResult<Self> {
        match store {
            RepositoryStore::Sqlite => Self::connect(&config.database_path).await,
            RepositoryStore::InMemorySqlite => Self::connect_in_memory().await,
        }
    }

    fn base_options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .journal_mode(SqliteJournalMode::Wal)
            // every commit is on disk before control returns to the caller
            .synchronous(SqliteSynchronous::Full)
            .busy_timeout(Duration::from_millis(1500))
    }

    #[instrument(skip(self))]
    async fn migrate(&self) -> LibraryResult<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        if let Err(err) = sqlx::query("PRAGMA optimize").execute(&self.pool).await {
            warn!(error = %err, "PRAGMA optimize failed before closing the database");
        }
        self.pool.close().await;
    }
}

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_ansi(false)
        .json()
        .init();
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::utils::sqlite::Database;

    #[tokio::test]
    async fn test_should_connect_in_memory() {
        let db = Database::open(RepositoryStore::InMemorySqlite, &Configuration::default()).await.expect("should open db");
        assert!(!db.pool().is_closed());
        db.close().await;
        assert!(db.pool().is_closed());
    }

    #[tokio::test]
    async fn test_should_close_twice_without_failing() {
        let db = Database::connect_in_memory().await.expect("should open db");
        db.close().await;
        db.close().await;
        assert!(db.pool().is_closed());
    }

    #[tokio::test]
    async fn test_should_create_libros_table() {
        let db = Database::connect_in_memory().await.expect("should open db");
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM libros").fetch_one(db.pool()).await.expect("should count");
        assert_eq!(0, row.0);
        db.migrate().await.expect("migrations should be idempotent");
        db.close().await;
    }

    #[tokio::test]
    async fn test_should_create_database_file() {
        let dir = tempfile::tempdir().expect("should create dir");
        let path = dir.path().join("biblioteca.db");
        let db = Database::connect(&path).await.expect("should open db");
        db.close().await;
        assert!(path.exists());
    }
}
