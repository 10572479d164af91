//! Prediction service: the request-to-result pipeline
//!
//! validate → transform → classify → recommend → assemble. Both the HTML form
//! and the JSON API go through [`PredictionService::predict`]; they differ
//! only in how the result or error is rendered.

use chrono::{DateTime, Local};
use tracing::{debug, error, info};

use crate::config::defaults::{FALLBACK_CONFIDENCE, MODEL_CONFIDENCE};
use crate::model::RandomForest;
use crate::types::{PredictionResult, RawMeasurements};

use super::catalog::RecommendationCatalog;
use super::classifier::{Classifier, PredictionSource};
use super::error::PredictionError;
use super::transformer::Transformer;
use super::validator::Validator;

/// Start-up context holding the immutable classifier.
#[derive(Debug, Clone)]
pub struct PredictionService {
    classifier: Classifier,
}

impl PredictionService {
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Service over an optionally loaded forest.
    pub fn from_forest(forest: Option<RandomForest>) -> Self {
        match forest {
            Some(f) => Self::new(Classifier::with_model(f)),
            None => Self::new(Classifier::fallback()),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.has_model()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Run one prediction stamped with the current local time.
    pub fn predict(&self, raw: &RawMeasurements) -> Result<PredictionResult, PredictionError> {
        self.predict_at(raw, Local::now())
    }

    /// Run one prediction with an explicit timestamp.
    pub fn predict_at(
        &self,
        raw: &RawMeasurements,
        timestamp: DateTime<Local>,
    ) -> Result<PredictionResult, PredictionError> {
        let input = Validator::validate(raw).map_err(|e| {
            info!(feature = %e.feature(), code = e.code(), "Rejected measurements: {}", e);
            e
        })?;

        let features = Transformer::transform(&input);

        let outcome = self.classifier.predict(&features).map_err(|e| {
            error!(error = %e, input = ?input.values(), "Prediction inference failed");
            e
        })?;

        let confidence_score = match outcome.source {
            PredictionSource::Model => MODEL_CONFIDENCE,
            PredictionSource::Fallback => FALLBACK_CONFIDENCE,
        };
        debug!(
            class = outcome.class.id(),
            label = outcome.class.label(),
            source = ?outcome.source,
            "Prediction complete"
        );

        Ok(PredictionResult::new(
            outcome.class,
            RecommendationCatalog::lookup(outcome.class),
            input,
            confidence_score,
            timestamp,
        ))
    }
}
