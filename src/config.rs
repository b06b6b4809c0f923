//! Configuration management for the RAX file browser
//!
//! Settings come from built-in defaults, an optional `config.toml` and
//! `RAX_FS_*` environment variables, in increasing order of precedence.
//! All values are read once at startup; nothing here is mutable afterwards.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SERVER_ROOT: &str = "./server_root";
const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 10;

/// Startup configuration for the HTTP server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// TCP port for the HTTP listener
    pub port: u16,

    /// Directory exposed by the service; every request is confined beneath it
    pub server_root: String,

    /// Maximum size of a single uploaded file in MB
    pub max_upload_size_mb: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            server_root: DEFAULT_SERVER_ROOT.to_string(),
            max_upload_size_mb: DEFAULT_MAX_UPLOAD_SIZE_MB,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` (optional) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem, e.g. `"config"` for `config.toml`
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("server_root", DEFAULT_SERVER_ROOT)?
            .set_default("max_upload_size_mb", DEFAULT_MAX_UPLOAD_SIZE_MB as i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("RAX_FS").try_parsing(true))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.server_root.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "server_root cannot be empty".into(),
            ));
        }

        if self.max_upload_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get server root as PathBuf
    pub fn server_root_path(&self) -> PathBuf {
        PathBuf::from(&self.server_root)
    }

    /// Get maximum upload size in bytes
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}
