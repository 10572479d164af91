//! Service Configuration - bind address, CORS, body limit, artifact location
//! and log files
//!
//! Each struct implements `Default` with the values in [`super::defaults`],
//! so the service runs unchanged when no config file is present.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$SOIL_CONFIG` env var
/// 2. `./soil_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Classifier artifact configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Rolling file log configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order, then apply the
    /// `SOIL_SERVER_ADDR` / `SOIL_MODEL_PATH` environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from_search_path();
        config.apply_overrides(
            std::env::var("SOIL_SERVER_ADDR").ok(),
            std::env::var("SOIL_MODEL_PATH").ok(),
        );
        config
    }

    fn load_from_search_path() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var("SOIL_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from SOIL_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from SOIL_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "SOIL_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./soil_config.toml
        let local = PathBuf::from(defaults::CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::CONFIG_FILE_NAME);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::CONFIG_FILE_NAME);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::CONFIG_FILE_NAME);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the bind address and/or artifact path. Empty values are ignored.
    pub fn apply_overrides(&mut self, addr: Option<String>, model_path: Option<String>) {
        if let Some(addr) = addr.filter(|a| !a.trim().is_empty()) {
            self.server.addr = addr;
        }
        if let Some(path) = model_path.filter(|p| !p.trim().is_empty()) {
            self.model.path = PathBuf::from(path);
        }
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate the whole config, collecting every problem.
    ///
    /// Rules:
    /// - Bind address must parse as `host:port`
    /// - CORS origins must be `*` or an `http(s)://` origin
    /// - Body limit must be > 0
    /// - Model path must be non-empty
    /// - Log directory and file prefix must be non-empty, at least one file kept
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let s = &self.server;
        if s.addr.parse::<SocketAddr>().is_err() {
            errors.push(format!("server.addr ({}) must be a HOST:PORT socket address", s.addr));
        }
        for origin in &s.cors_origins {
            let origin = origin.trim();
            if origin != "*" && !(origin.starts_with("http://") || origin.starts_with("https://")) {
                errors.push(format!(
                    "server.cors_origins entry '{origin}' must be \"*\" or start with http:// or https://"
                ));
            }
        }
        if s.max_body_bytes == 0 {
            errors.push("server.max_body_bytes must be > 0".to_string());
        }

        if self.model.path.as_os_str().is_empty() {
            errors.push("model.path must not be empty".to_string());
        }

        let l = &self.logging;
        if l.dir.as_os_str().is_empty() {
            errors.push("logging.dir must not be empty".to_string());
        }
        if l.file_prefix.trim().is_empty() {
            errors.push("logging.file_prefix must not be empty".to_string());
        }
        if l.max_files == 0 {
            errors.push("logging.max_files must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `SOIL_SERVER_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,

    /// Allowed cross-origin callers. `"*"` allows any origin; an empty list
    /// restricts the API to same-origin use.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum accepted request body size (bytes)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_server_addr() -> String {
    defaults::SERVER_ADDR.to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_max_body_bytes() -> usize {
    defaults::MAX_BODY_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
            cors_origins: default_cors_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// ============================================================================
// Model
// ============================================================================

/// Classifier artifact configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the exported random forest JSON.
    ///
    /// Can be overridden by `SOIL_MODEL_PATH` env var or `--model` CLI flag.
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// Refuse to start without an artifact instead of serving in fallback mode.
    #[serde(default)]
    pub required: bool,
}

fn default_model_path() -> PathBuf {
    PathBuf::from(defaults::MODEL_PATH)
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            required: false,
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Rolling log file configuration. Console output to stderr is always on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to daily-rotated files under `dir`
    #[serde(default = "default_log_enabled")]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// File name prefix, e.g. `soil_health_app` gives `soil_health_app.2024-01-01.log`
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,

    /// Oldest files beyond this count are deleted on rotation
    #[serde(default = "default_log_max_files")]
    pub max_files: usize,
}

fn default_log_enabled() -> bool {
    true
}
fn default_log_dir() -> PathBuf {
    PathBuf::from(defaults::LOG_DIR)
}
fn default_log_file_prefix() -> String {
    defaults::LOG_FILE_PREFIX.to_string()
}
fn default_log_max_files() -> usize {
    defaults::LOG_MAX_FILES
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_log_enabled(),
            dir: default_log_dir(),
            file_prefix: default_log_file_prefix(),
            max_files: default_log_max_files(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
