//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationErrors;
use inference_engine::{InferenceError, StartupError};
use thiserror::Error;
use tracing::error;

use crate::routes::predict::{ErrorResponse, ValidationResponse};

/// Errors a request handler can answer with
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected input, answered with 422 and per-field detail
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// Classifier failure, answered with 500
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse {
                    detail: errors.into_errors(),
                }),
            )
                .into_response(),
            ApiError::Inference(e) => {
                error!("Inference error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Errors that stop the server process
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("startup failed: {0}")]
    Startup(#[from] StartupError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
