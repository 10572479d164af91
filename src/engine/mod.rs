//! Soil fertility prediction engine
//!
//! ## Architecture
//! - `schema`: static registry of the twelve measurements and their ranges
//! - `validator`: fail-fast validation of raw input into an `InputVector`
//! - `transformer`: `log10(x + ε)` preprocessing
//! - `classifier`: wrapper around the loaded model with fallback mode
//! - `catalog`: remediation plan per fertility class
//! - `service`: the request-to-result pipeline
//! - `error`: validation / inference error taxonomy
//!
//! Everything here is synchronous and request-scoped. The only long-lived
//! object is the `PredictionService`, built once at start-up and read-only.

pub mod schema;
pub mod validator;
pub mod transformer;
pub mod classifier;
pub mod catalog;
pub mod service;
pub mod error;

// Re-export public types
pub use schema::FeatureSchema;
pub use validator::Validator;
pub use transformer::Transformer;
pub use classifier::{ClassOutcome, Classifier, PredictionSource};
pub use catalog::RecommendationCatalog;
pub use service::PredictionService;
pub use error::{InferenceFailure, PredictionError, ValidationError, INFERENCE_FAILURE_MESSAGE};
