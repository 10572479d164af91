//! JSON response envelope for the prediction API.
//!
//! Every `/api/predict` response carries a `success` flag so clients can
//! branch on the body alone. Failures are still HTTP 200; the mobile client
//! never inspects the status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::engine::PredictionError;
use crate::types::PredictionResult;

/// Code for an empty, unparseable or non-object request body.
pub const NO_DATA_CODE: &str = "NO_DATA";
pub const NO_DATA_MESSAGE: &str = "No JSON data provided";

/// Successful prediction: `{ "success": true, ...PredictionResult }`
#[derive(Debug, Serialize)]
pub struct ApiSuccess<'a> {
    pub success: bool,
    #[serde(flatten)]
    pub result: &'a PredictionResult,
}

impl<'a> ApiSuccess<'a> {
    pub fn new(result: &'a PredictionResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Failed prediction: `{ "success": false, "error": "...", "code": "..." }`
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

impl ApiFailure {
    pub fn new(code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
            code,
        }
    }

    pub fn no_data() -> Self {
        Self::new(NO_DATA_CODE, NO_DATA_MESSAGE)
    }

    /// Validation message verbatim, or the generic inference message.
    pub fn from_error(err: &PredictionError) -> Self {
        Self::new(err.code(), err.user_message())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}
