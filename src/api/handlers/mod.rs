//! API route handlers
//!
//! - Form page and form submission (HTML)
//! - JSON prediction endpoint
//! - Health probe

mod form;
mod health;
mod predict;

pub use form::*;
pub use health::*;
pub use predict::*;

use std::sync::Arc;

use crate::engine::PredictionService;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Prediction pipeline, read-only after start-up
    pub service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
