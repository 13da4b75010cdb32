use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::settings::SettingsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Screening timed out: {0}")]
    Timeout(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Settings(e) => (StatusCode::BAD_REQUEST, "INVALID_SETTINGS", e.to_string()),
            AppError::Timeout(msg) => {
                tracing::warn!("Screening timeout: {msg}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "SCREENING_TIMEOUT",
                    "Screening did not finish in time".to_string(),
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
