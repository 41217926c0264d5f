//! GET /health: checks the deep and fast model profiles.

use ai_gateway::health_service::HealthStatus;
use axum::extract::State;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

/// Always 200; per-profile `ok` flags carry the verdict.
pub async fn health(State(state): State<AppState>) -> ApiResponse<Vec<HealthStatus>> {
    ApiResponse::success(state.health.check_profiles(&state.config).await)
}
