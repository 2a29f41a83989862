//! Application configuration
//!
//! Settings are layered: built-in defaults, then an optional `explorer.toml`
//! in the working directory, then `EXPLORER__*` environment variables
//! (e.g. `EXPLORER__SERVER__PORT=8080`).

use std::path::PathBuf;

use catalog::CatalogConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where local state is kept
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".explorer"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageSettings,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from `explorer.toml` and the environment
    ///
    /// # Environment Variables
    /// - `EXPLORER__<SECTION>__<KEY>`: overrides any setting
    /// - `TMDB_API_KEY`: catalog API key when none is configured otherwise
    pub fn load() -> Result<Self, ConfigError> {
        let mut config: AppConfig = Config::builder()
            .add_source(File::with_name("explorer").required(false))
            .add_source(
                Environment::with_prefix("EXPLORER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if config.catalog.api_key.is_none() {
            config.catalog.api_key = std::env::var("TMDB_API_KEY").ok();
        }

        Ok(config)
    }
}
