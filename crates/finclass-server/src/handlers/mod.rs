//! HTTP route handlers for the prediction server.

pub mod predict;

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{HealthResponse, RootResponse};
use crate::ServerState;

/// Static banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Financial Behavior Classifier API",
    })
}

/// Readiness check. Artifacts are loaded before the listener binds, so this
/// always reports ready.
pub async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        artifacts_loaded: true,
        classes: state.engine.classes().to_vec(),
    })
}
