use std::time::Duration;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

pub const CONFIG_FILE: &str = "biblioteca.toml";
pub const ENV_PREFIX: &str = "BIBLIOTECA_";

// Configuration abstracts config options for the catalog server and the backup utility
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub port: u16,
    pub database_path: String,
    pub snapshot_path: String,
    pub remote_catalog_url: String,
    pub metadata_url: String,
    pub http_timeout_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            port: 3000,
            database_path: "biblioteca.db".to_string(),
            snapshot_path: "backup.json".to_string(),
            remote_catalog_url: "https://biblioteca-back-315x.onrender.com/api/libros".to_string(),
            metadata_url: "https://www.googleapis.com/books/v1".to_string(),
            http_timeout_secs: 10,
        }
    }
}

impl Configuration {
    /// Loads defaults, then `biblioteca.toml` if present, then `BIBLIOTECA_*`
    /// variables and finally the plain `PORT` variable.
    pub fn load() -> LibraryResult<Self> {
        Self::load_from(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Configuration::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&["PORT"]))
    }

    pub fn load_from(figment: Figment) -> LibraryResult<Self> {
        Ok(figment.extract::<Configuration>()?)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
