//! Service Configuration Module
//!
//! Provides the service configuration loaded from a TOML file.
//!
//! ## Loading Order
//!
//! 1. `SOIL_CONFIG` environment variable (path to TOML file)
//! 2. `soil_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! `SOIL_SERVER_ADDR` and `SOIL_MODEL_PATH` override the file afterwards, and
//! CLI flags override both.
//!
//! ## Usage
//!
//! The config is loaded once in `main()` and passed down explicitly:
//!
//! ```ignore
//! let config = AppConfig::load();
//! let service = build_service(&config)?;
//! let app = api::create_app(AppState::new(service), &config.server);
//! ```

mod app_config;
pub mod defaults;

pub use app_config::*;
