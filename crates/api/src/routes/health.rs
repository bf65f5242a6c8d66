//! Info and Health Routes

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Response for the root endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_loaded: bool,
}

/// Static service description
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "This is a insurance premium predictor API!".to_string(),
    })
}

/// Health check handler. Reports static facts only; never runs inference.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        version: state.service.version().to_string(),
        model_loaded: state.service.is_loaded(),
    })
}
