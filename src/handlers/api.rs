use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    pub model_loaded: bool,
}

/// Report whether the synthesis engine finished loading.
///
/// Always answers 200; readiness is carried in the body.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: state.readiness.status_label().to_string(),
        model_loaded: state.readiness.is_ready(),
    })
}
