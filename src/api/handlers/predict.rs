//! JSON prediction endpoint

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::{debug, error};

use crate::api::envelope::{ApiFailure, ApiSuccess};
use crate::engine::{PredictionService, INFERENCE_FAILURE_MESSAGE};
use crate::types::RawMeasurements;

use super::AppState;

/// Parse a request body into measurements.
///
/// Empty input, malformed JSON, non-objects and `{}` all map to the
/// `No JSON data provided` failure.
pub fn parse_measurements(body: &[u8]) -> Result<RawMeasurements, ApiFailure> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) if !map.is_empty() => Ok(RawMeasurements::from_json_object(&map)),
        Ok(_) => {
            debug!("Prediction request body is not a non-empty JSON object");
            Err(ApiFailure::no_data())
        }
        Err(e) => {
            debug!(error = %e, bytes = body.len(), "Prediction request body is not JSON");
            Err(ApiFailure::no_data())
        }
    }
}

/// Run one JSON prediction and render it as the API envelope body.
pub fn predict_json(service: &PredictionService, body: &[u8]) -> Result<Value, serde_json::Error> {
    let envelope = match parse_measurements(body) {
        Ok(raw) => match service.predict(&raw) {
            Ok(result) => serde_json::to_value(ApiSuccess::new(&result))?,
            Err(e) => serde_json::to_value(ApiFailure::from_error(&e))?,
        },
        Err(failure) => serde_json::to_value(failure)?,
    };
    Ok(envelope)
}

/// POST /api/predict - Classify a JSON object of measurements
///
/// The body is read raw so that a missing content type or malformed JSON
/// produces the envelope instead of an extractor rejection.
pub async fn api_predict(State(state): State<AppState>, body: Bytes) -> Response {
    match predict_json(&state.service, &body) {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize prediction envelope");
            ApiFailure::new("INTERNAL_ERROR", INFERENCE_FAILURE_MESSAGE).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureId;

    #[test]
    fn test_parse_rejects_non_objects() {
        for body in [&b""[..], b"   ", b"null", b"[1,2]", b"\"N\"", b"{}", b"{not json"] {
            let failure = parse_measurements(body).unwrap_err();
            assert_eq!(failure.code, "NO_DATA");
        }
    }

    #[test]
    fn test_parse_accepts_numbers_and_strings() {
        let raw = parse_measurements(br#"{"N": 50, "pH": "6.5"}"#).unwrap();
        assert_eq!(raw.get(FeatureId::N), Some("50"));
        assert_eq!(raw.get(FeatureId::Ph), Some("6.5"));
    }

    #[test]
    fn test_predict_json_reports_validation_failure() {
        let service = PredictionService::from_forest(None);
        let v = predict_json(&service, br#"{"N": 50}"#).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["code"], "MISSING_FIELD");
        assert_eq!(v["error"], "Missing value for Phosphorus (P). Please fill in all required fields.");
    }
}
