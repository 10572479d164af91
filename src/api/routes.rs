//! API route definitions
//!
//! - `/` and `/predict` - HTML form flow
//! - `/api/health` - connectivity probe
//! - `/api/predict` - JSON prediction

use axum::{routing::{get, post}, Router};

use super::handlers::{self, AppState};

/// HTML form flow
pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::form_predict))
        .with_state(state)
}

/// JSON API, nested under `/api`
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/predict", post(handlers::api_predict))
        .with_state(state)
}
