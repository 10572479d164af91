//! System-wide default constants.
//!
//! Centralises the fixed numbers of the prediction pipeline and the service
//! defaults. Grouped by subsystem for easy discovery.

use crate::types::FertilityClass;

// ============================================================================
// Preprocessing
// ============================================================================

/// Offset added before `log10` so a zero measurement stays finite.
///
/// Serving-time only: the training export applied plain `log10(x)`.
pub const LOG_EPSILON: f64 = 1e-10;

// ============================================================================
// Classifier
// ============================================================================

/// Class reported when no model artifact is loaded.
pub const FALLBACK_CLASS: FertilityClass = FertilityClass::Fertile;

/// Placeholder confidence for predictions made by the loaded model.
pub const MODEL_CONFIDENCE: f64 = 0.85;

/// Placeholder confidence for predictions made in fallback mode.
pub const FALLBACK_CONFIDENCE: f64 = 0.70;

/// Artifact JSON layout version this build understands.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

// ============================================================================
// Server
// ============================================================================

/// HTTP bind address.
pub const SERVER_ADDR: &str = "0.0.0.0:5000";

/// Classifier artifact location, relative to the working directory.
pub const MODEL_PATH: &str = "model/random_forest_model.json";

/// Request body limit (bytes). Twelve numbers never need more.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "soil_config.toml";

// ============================================================================
// Logging
// ============================================================================

/// Directory for the rolling log files, relative to the working directory.
pub const LOG_DIR: &str = "logs";

/// Log file name prefix; files are `<prefix>.<date>.log`.
pub const LOG_FILE_PREFIX: &str = "soil_health_app";

/// Rotated log files kept on disk.
pub const LOG_MAX_FILES: usize = 10;
