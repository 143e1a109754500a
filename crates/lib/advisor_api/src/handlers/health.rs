//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health` — reports the crate version, completion model and store
/// connectivity.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = state.store.ping().await;
    if !store_connected {
        warn!("conversation store unreachable");
    }

    Json(HealthResponse {
        version: advisor_core::version().to_string(),
        model: state.config.completion_model.clone(),
        store_connected,
    })
}
