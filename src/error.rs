use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use grocer_assistant::AssistantError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Assistant error: {0}")]
    AssistantError(#[from] AssistantError),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::AssistantError(e) => {
                tracing::error!(err = %e, "Assistant error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
