use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::{AudioError, EngineError, ValidationError};

/// Detail returned for every server-side failure. The underlying error is
/// logged, never sent to the client.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error: Failed to generate audio.";

pub type AppResult<T> = Result<T, AppError>;

/// Errors produced at the HTTP boundary.
///
/// Every variant renders as `{"detail": ...}` with the matching status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// Body the JSON extractor could not accept, with axum's status
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    /// Carries the real cause for logging only
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Rejected { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing detail string.
    pub fn detail(&self) -> &str {
        match self {
            AppError::ServiceUnavailable(msg)
            | AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::Rejected { detail: msg, .. } => msg,
            AppError::Internal(_) => INTERNAL_ERROR_DETAIL,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let detail = err.to_string();
        match err {
            ValidationError::ModelNotLoaded => AppError::ServiceUnavailable(detail),
            ValidationError::EmptyText => AppError::BadRequest(detail),
            ValidationError::TextTooLong { .. } => AppError::PayloadTooLarge(detail),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<AudioError> for AppError {
    fn from(err: AudioError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_status_codes() {
        let cases = [
            (
                ValidationError::ModelNotLoaded,
                StatusCode::SERVICE_UNAVAILABLE,
                "Model is not loaded.",
            ),
            (
                ValidationError::EmptyText,
                StatusCode::BAD_REQUEST,
                "Text input is empty.",
            ),
            (
                ValidationError::TextTooLong { max_chars: 500 },
                StatusCode::PAYLOAD_TOO_LARGE,
                "Text too long. Max 500 characters.",
            ),
        ];

        for (validation, status, detail) in cases {
            let err = AppError::from(validation);
            assert_eq!(err.status_code(), status);
            assert_eq!(err.detail(), detail);
        }
    }

    #[test]
    fn test_internal_detail_hides_cause() {
        let err = AppError::from(EngineError::Generation("tensor shape mismatch".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), INTERNAL_ERROR_DETAIL);
        assert!(err.to_string().contains("tensor shape mismatch"));
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = AppError::BadRequest("Text input is empty.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "detail": "Text input is empty." }));
    }
}
