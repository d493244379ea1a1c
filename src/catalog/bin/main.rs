use std::net::SocketAddr;
use tracing::{error, info};
use biblioteca::catalog::controller::routes;
use biblioteca::core::controller::AppState;
use biblioteca::core::domain::Configuration;
use biblioteca::core::library::{LibraryError, LibraryResult};
use biblioteca::core::repository::RepositoryStore;
use biblioteca::gateway::factory::create_resolver;
use biblioteca::utils::sqlite::{setup_tracing, Database};

#[tokio::main]
async fn main() -> LibraryResult<()> {
    setup_tracing();

    let config = Configuration::load()?;
    let db = Database::open(RepositoryStore::Sqlite, &config).await?;
    let resolver = create_resolver(&config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = routes(AppState::new(db, resolver));

    info!(%addr, "catalog server listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            error!(error = %err, "catalog server stopped");
            LibraryError::runtime(format!("server error {}", err).as_str(), None)
        })
}
