//! Classifier wrapper with fallback mode
//!
//! Holds the optional pre-trained model. Without one, every prediction is the
//! fixed fallback class; that is degraded service, not an error.

use std::sync::Arc;

use crate::config::defaults::FALLBACK_CLASS;
use crate::model::FertilityModel;
use crate::types::{FeatureId, FertilityClass, TransformedVector};

use super::error::InferenceFailure;

/// Where a class came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    /// The loaded artifact
    Model,
    /// No artifact loaded, fixed stub class
    Fallback,
}

/// Classifier decision plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassOutcome {
    pub class: FertilityClass,
    pub source: PredictionSource,
}

/// Immutable wrapper around the optional loaded model.
#[derive(Debug, Clone)]
pub struct Classifier {
    model: Option<Arc<dyn FertilityModel>>,
}

impl Classifier {
    pub fn new(model: Option<Arc<dyn FertilityModel>>) -> Self {
        Self { model }
    }

    pub fn with_model(model: impl FertilityModel + 'static) -> Self {
        Self::new(Some(Arc::new(model)))
    }

    /// Classifier with no artifact.
    pub fn fallback() -> Self {
        Self::new(None)
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Summary of the loaded model, if any.
    pub fn describe(&self) -> Option<String> {
        self.model.as_ref().map(|m| m.describe())
    }

    pub fn predict(&self, features: &TransformedVector) -> Result<ClassOutcome, InferenceFailure> {
        let Some(model) = &self.model else {
            return Ok(ClassOutcome {
                class: FALLBACK_CLASS,
                source: PredictionSource::Fallback,
            });
        };

        if let Some(id) = FeatureId::ALL.into_iter().find(|id| !features.get(*id).is_finite()) {
            return Err(InferenceFailure::NonFiniteFeature {
                feature: id,
                value: features.get(id),
            });
        }

        let class = model.predict(features)?;
        Ok(ClassOutcome {
            class,
            source: PredictionSource::Model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::forest::tests::stump;
    use crate::model::RandomForest;
    use crate::types::NUM_FEATURES;

    fn forest() -> RandomForest {
        RandomForest::new(
            FertilityClass::ALL.to_vec(),
            vec![stump(0, 1.0, [3.0, 1.0, 0.0], [0.0, 1.0, 3.0])],
        )
        .unwrap()
    }

    #[test]
    fn test_fallback_returns_fixed_class() {
        let classifier = Classifier::fallback();
        assert!(!classifier.has_model());
        let outcome = classifier
            .predict(&TransformedVector::from_values([0.0; NUM_FEATURES]))
            .unwrap();
        assert_eq!(outcome.class, FertilityClass::Fertile);
        assert_eq!(outcome.source, PredictionSource::Fallback);
    }

    #[test]
    fn test_model_is_used_when_loaded() {
        let classifier = Classifier::with_model(forest());
        assert!(classifier.has_model());
        let outcome = classifier
            .predict(&TransformedVector::from_values([2.0; NUM_FEATURES]))
            .unwrap();
        assert_eq!(outcome.class, FertilityClass::HighlyFertile);
        assert_eq!(outcome.source, PredictionSource::Model);
        assert!(classifier.describe().unwrap().contains("1 trees"));
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let classifier = Classifier::with_model(forest());
        let x = TransformedVector::from_values([0.5; NUM_FEATURES]);
        let first = classifier.predict(&x).unwrap();
        for _ in 0..20 {
            assert_eq!(classifier.predict(&x).unwrap(), first);
        }
    }

    #[test]
    fn test_non_finite_feature_is_inference_failure() {
        let classifier = Classifier::with_model(forest());
        let mut values = [0.5; NUM_FEATURES];
        values[FeatureId::Zn.index()] = f64::NAN;
        let err = classifier.predict(&TransformedVector::from_values(values)).unwrap_err();
        assert!(matches!(
            err,
            InferenceFailure::NonFiniteFeature { feature: FeatureId::Zn, .. }
        ));
    }
}
