//! Prediction output handed back to the web layer

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use super::{FertilityClass, InputVector, RecommendationRecord};

/// Timestamp layout shown to users and returned by the JSON API.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of one successful prediction.
///
/// Field names are the JSON API's response keys.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Predicted class id
    pub prediction: FertilityClass,
    /// Human-readable class label
    pub fertility_class: &'static str,
    pub recommendation: &'static RecommendationRecord,
    /// Echo of the validated measurements
    pub input_data: InputVector,
    /// Fixed placeholder per serving mode, not a posterior probability
    pub confidence_score: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Local>,
}

impl PredictionResult {
    pub fn new(
        prediction: FertilityClass,
        recommendation: &'static RecommendationRecord,
        input_data: InputVector,
        confidence_score: f64,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            prediction,
            fertility_class: prediction.label(),
            recommendation,
            input_data,
            confidence_score,
            timestamp,
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}
