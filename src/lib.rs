//! Soil Health: soil fertility classification service
//!
//! Classifies a soil sample described by twelve chemical measurements into one
//! of three fertility classes and attaches a remediation plan.
//!
//! ## Architecture
//!
//! - **Engine**: validation, preprocessing, classification, recommendations
//! - **Model**: pre-trained random forest loaded from a JSON artifact
//! - **API**: HTML form flow and JSON endpoint over axum
//! - **Config**: TOML configuration with env and CLI overrides

pub mod api;
pub mod config;
pub mod engine;
pub mod model;
pub mod types;

// Re-export configuration
pub use config::{AppConfig, ConfigError};

// Re-export commonly used types
pub use types::{
    FeatureId, FeatureSpec, FertilityClass, InputVector, PredictionResult, RawMeasurements,
    RecommendationRecord, TransformedVector, NUM_FEATURES,
};

// Re-export the prediction pipeline
pub use engine::{
    Classifier, FeatureSchema, InferenceFailure, PredictionError, PredictionService,
    RecommendationCatalog, Transformer, ValidationError, Validator,
};

// Re-export model loading
pub use model::{load_optional, ArtifactError, FertilityModel, RandomForest};
