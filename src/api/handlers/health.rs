//! Health probe used by the mobile client's connectivity check

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// False while serving in fallback mode
    pub model_loaded: bool,
}

/// GET /api/health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        message: "Soil API is reachable",
        model_loaded: state.service.model_loaded(),
    })
}
