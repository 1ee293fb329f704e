use std::path::PathBuf;

use common::media::DEFAULT_MAX_IMAGE_BYTES;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty mirrors whatever origin the request carries.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Cap on request bodies, kept above the image limit so oversized
    /// uploads are rejected by validation with a readable message.
    pub max_body_bytes: usize,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub sqlx_logging: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded images.
    pub upload_dir: PathBuf,
    pub max_image_bytes: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("STOCKROOM_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.max_body_bytes", 16 * 1024 * 1024)?
            .set_default("database.url", "sqlite://stockroom.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.sqlx_logging", false)?
            .set_default("storage.upload_dir", "./uploads")?
            .set_default("storage.max_image_bytes", DEFAULT_MAX_IMAGE_BYTES)?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., STOCKROOM__DATABASE__URL)
            .add_source(Environment::with_prefix("STOCKROOM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
