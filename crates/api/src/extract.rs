//! Validated Request Body Extractor

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, Request},
    Json,
};
use data_validator::{ErrorKind, FieldError, UserInput};
use serde_json::Value;
use std::sync::Arc;

use crate::{ApiError, AppState};

/// A request body that parsed as JSON and passed validation.
///
/// Rejections never reach the handler, so the prediction service is only
/// called for valid input.
pub struct ValidatedInput(pub UserInput);

#[async_trait]
impl<S> FromRequest<S> for ValidatedInput
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(
                    FieldError::body(rejection.body_text(), ErrorKind::InvalidJson).into(),
                )
            })?;

        let app = Arc::<AppState>::from_ref(state);
        let input = app.validator.validate_json(&body)?;
        Ok(Self(input))
    }
}
