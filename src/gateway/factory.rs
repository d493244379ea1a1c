use std::sync::Arc;
use std::time::Duration;
use reqwest::Client;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::catalog::RemoteCatalog;
use crate::gateway::google::resolver::GoogleBooksResolver;
use crate::gateway::metadata::MetadataResolver;
use crate::gateway::remote::catalog::HttpRemoteCatalog;

// every outbound call is bounded by the configured timeout
pub fn build_http_client(timeout: Duration) -> LibraryResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| LibraryError::runtime(format!("failed to build http client {}", err).as_str(), None))
}

pub fn create_resolver(config: &Configuration) -> LibraryResult<Arc<dyn MetadataResolver>> {
    let client = build_http_client(config.http_timeout())?;
    Ok(Arc::new(GoogleBooksResolver::new(client, config.metadata_url.as_str())))
}

pub fn create_remote_catalog(config: &Configuration) -> LibraryResult<Box<dyn RemoteCatalog>> {
    let client = build_http_client(config.http_timeout())?;
    Ok(Box::new(HttpRemoteCatalog::new(client, config.remote_catalog_url.as_str())))
}
