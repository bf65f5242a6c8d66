//! Prediction Route

use axum::{extract::State, Json};
use data_validator::FieldError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::{ApiError, AppState, ValidatedInput};

/// Successful prediction
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_category: String,
}

/// Body of a 500 answer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a 422 answer
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub detail: Vec<FieldError>,
}

/// Predict the premium category for one user
pub async fn predict(
    State(state): State<Arc<AppState>>,
    ValidatedInput(input): ValidatedInput,
) -> Result<Json<PredictionResponse>, ApiError> {
    let record = input.to_feature_record();
    debug!(city = input.city(), ?record, "predicting");

    let predicted_category = state.service.predict(&record)?;

    Ok(Json(PredictionResponse { predicted_category }))
}
