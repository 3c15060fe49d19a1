#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The wire shape is a flat `{ "error": message, "code": code }` object;
/// credential details never leave the server.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Empty file")]
    EmptyFile,

    #[error("File too large: {0} bytes")]
    FileTooLarge(u64),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Upstream API key is not configured")]
    NotConfigured,

    #[error("Upstream rate limit exceeded")]
    RateLimited,

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Analysis failed (upstream status {status}): {message}")]
    AnalysisFailed { status: u16, message: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg.clone()),
            AppError::UnsupportedFileType(_) => (
                StatusCode::BAD_REQUEST,
                "unsupported_file_type",
                "Please upload a PDF, TXT, or Word document".to_string(),
            ),
            AppError::EmptyFile => (
                StatusCode::BAD_REQUEST,
                "empty_file",
                "The uploaded file is empty".to_string(),
            ),
            AppError::FileTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "file_too_large",
                "File size should be less than 10MB".to_string(),
            ),
            AppError::Extraction(msg) => {
                tracing::warn!("Extraction failed: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "extraction_failed",
                    "Could not extract text from the uploaded file".to_string(),
                )
            }
            AppError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "not_configured",
                "Server is not configured with GROQ_API_KEY".to_string(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Rate limit exceeded, please try again later".to_string(),
            ),
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_unavailable",
                    "The analysis service is temporarily unavailable".to_string(),
                )
            }
            AppError::AnalysisFailed { status, message } => {
                tracing::error!("Upstream API error (status {status}): {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    "analysis_failed",
                    "Analysis failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("cvText cannot be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rate_limited_maps_to_429() {
        let response = AppError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_missing_key_is_fixed_500() {
        let response = AppError::NotConfigured.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_failure_maps_to_502() {
        let response = AppError::AnalysisFailed {
            status: 400,
            message: "bad request".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
