//! Error taxonomy of the prediction pipeline
//!
//! Validation errors are user-facing and shown verbatim. Inference failures
//! carry diagnostic detail for the server log only; users see
//! [`PredictionError::user_message`].

use thiserror::Error;

use crate::types::{FeatureId, FeatureSpec};

/// Generic text shown to users when inference fails.
pub const INFERENCE_FAILURE_MESSAGE: &str =
    "An error occurred during prediction. Please try again later.";

// ============================================================================
// Validation
// ============================================================================

/// First problem found in the raw measurements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Identifier absent, or its value blank
    #[error("Missing value for {label}. Please fill in all required fields.")]
    MissingField { feature: FeatureId, label: &'static str },

    /// Present but not a floating-point number
    #[error("Invalid value for {label}: {raw}")]
    InvalidValue {
        feature: FeatureId,
        label: &'static str,
        raw: String,
    },

    /// A number outside the inclusive plausible range.
    ///
    /// The message quotes the trimmed input text, not the parsed float.
    #[error(
        "{label} value {raw}{u} is unrealistic. Please enter a value between {min} and {max}{u}. \
         Typical range in dataset: {typical_range}{u}.",
        u = crate::types::unit_suffix(.unit)
    )]
    OutOfRange {
        feature: FeatureId,
        label: &'static str,
        raw: String,
        value: f64,
        min: f64,
        max: f64,
        unit: &'static str,
        typical_range: &'static str,
    },
}

impl ValidationError {
    pub(crate) fn missing(spec: &FeatureSpec) -> Self {
        ValidationError::MissingField {
            feature: spec.id,
            label: spec.label,
        }
    }

    pub(crate) fn invalid(spec: &FeatureSpec, raw: &str) -> Self {
        ValidationError::InvalidValue {
            feature: spec.id,
            label: spec.label,
            raw: raw.to_string(),
        }
    }

    pub(crate) fn out_of_range(spec: &FeatureSpec, raw: &str, value: f64) -> Self {
        ValidationError::OutOfRange {
            feature: spec.id,
            label: spec.label,
            raw: raw.to_string(),
            value,
            min: spec.min,
            max: spec.max,
            unit: spec.unit,
            typical_range: spec.typical_range,
        }
    }

    /// The offending feature.
    pub fn feature(&self) -> FeatureId {
        match self {
            ValidationError::MissingField { feature, .. }
            | ValidationError::InvalidValue { feature, .. }
            | ValidationError::OutOfRange { feature, .. } => *feature,
        }
    }

    /// Stable machine-readable code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "MISSING_FIELD",
            ValidationError::InvalidValue { .. } => "INVALID_VALUE",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
        }
    }
}

// ============================================================================
// Inference
// ============================================================================

/// Unexpected failure inside the classifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceFailure {
    #[error("feature {feature} is not finite after transform ({value})")]
    NonFiniteFeature { feature: FeatureId, value: f64 },

    #[error("tree {tree}: node {node} is out of bounds")]
    NodeOutOfBounds { tree: usize, node: usize },

    #[error("tree {tree}: leaf {node} has no class weight")]
    EmptyLeaf { tree: usize, node: usize },

    #[error("model emitted a vote vector of width {got}, expected {expected}")]
    VoteWidthMismatch { got: usize, expected: usize },

    #[error("model produced no class vote")]
    NoVote,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Any failure of [`crate::engine::PredictionService::predict`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceFailure),
}

impl PredictionError {
    /// Text safe to show to the user.
    pub fn user_message(&self) -> String {
        match self {
            PredictionError::Validation(e) => e.to_string(),
            PredictionError::Inference(_) => INFERENCE_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PredictionError::Validation(e) => e.code(),
            PredictionError::Inference(_) => "INFERENCE_FAILURE",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PredictionError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FeatureSchema;

    #[test]
    fn test_out_of_range_message_with_unit() {
        let err = ValidationError::out_of_range(FeatureSchema::spec(FeatureId::N), "600", 600.0);
        assert_eq!(
            err.to_string(),
            "Nitrogen (N) value 600 mg/kg is unrealistic. Please enter a value between 1 \
             and 500 mg/kg. Typical range in dataset: 6-383 mg/kg."
        );
    }

    #[test]
    fn test_out_of_range_message_without_unit() {
        let err = ValidationError::out_of_range(FeatureSchema::spec(FeatureId::Ph), "20", 20.0);
        assert_eq!(
            err.to_string(),
            "pH (0-14) value 20 is unrealistic. Please enter a value between 0.5 and 14. \
             Typical range in dataset: 0.9-11.2."
        );
    }

    #[test]
    fn test_out_of_range_message_echoes_input_text() {
        let err = ValidationError::out_of_range(FeatureSchema::spec(FeatureId::N), "1e-300", 1e-300);
        let message = err.to_string();
        assert!(message.starts_with("Nitrogen (N) value 1e-300 mg/kg is unrealistic."), "{message}");
        assert!(message.len() < 150, "{message}");
    }

    #[test]
    fn test_inference_detail_is_hidden_from_users() {
        let err = PredictionError::from(InferenceFailure::NodeOutOfBounds { tree: 3, node: 99 });
        assert_eq!(err.user_message(), INFERENCE_FAILURE_MESSAGE);
        assert!(err.to_string().contains("node 99"));
        assert_eq!(err.code(), "INFERENCE_FAILURE");
        assert!(!err.is_validation());
    }
}
