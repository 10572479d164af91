//! Browser-facing pages: the measurement form and its result/error pages

use std::collections::HashMap;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

use crate::api::pages;
use crate::types::RawMeasurements;
use tracing::debug;

use super::AppState;

/// GET / - Measurement form
pub async fn index() -> Html<String> {
    Html(pages::render_index())
}

/// POST /predict - Form submission, renders the result page
///
/// Validation problems render as 422 with the message verbatim; inference
/// failures as 500 with the generic message. A body that is not a form is
/// treated as an empty submission.
pub async fn form_predict(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let raw = match form {
        Ok(Form(fields)) => RawMeasurements::from(fields),
        Err(rejection) => {
            debug!(error = %rejection, "Form body rejected, treating as empty submission");
            RawMeasurements::new()
        }
    };

    match state.service.predict(&raw) {
        Ok(result) => Html(pages::render_result(&result)).into_response(),
        Err(e) => {
            let status = if e.is_validation() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Html(pages::render_error(&e.user_message()))).into_response()
        }
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(pages::render_error("Page not found"))).into_response()
}
