use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::recommendation::classifier::ClassifierError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Model not loaded")]
    ServiceUnavailable,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Classifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::ServiceUnavailable => (
                "SERVICE_UNAVAILABLE",
                "Model not loaded. Predictions are unavailable.".to_string(),
            ),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Classifier(e) => {
                tracing::error!("Classifier error: {e}");
                (
                    "CLASSIFIER_ERROR",
                    "The recommendation model failed to score this profile".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
