//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] crate::domain::DomainError),

    // Upstream errors (5xx)
    #[error("Report data unavailable: {0}")]
    DataUnavailable(#[from] crate::source::SourceError),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 404 Not Found
            AppError::OwnerNotFound(key) => {
                (StatusCode::NOT_FOUND, "owner_not_found", Some(key.clone()))
            }

            // Domain errors - map to appropriate HTTP status
            AppError::Domain(ref domain_err) => {
                use crate::domain::DomainError;
                let (code, details) = match domain_err {
                    DomainError::InvalidAmount(msg) => ("invalid_amount", Some(msg.clone())),
                    DomainError::InvalidIdentifier(msg) => ("invalid_identifier", Some(msg.clone())),
                    DomainError::InvalidRatio { .. } => ("invalid_payout_ratio", None),
                };
                if domain_err.is_client_error() {
                    (StatusCode::BAD_REQUEST, code, details)
                } else {
                    tracing::error!("Payout policy error: {}", domain_err);
                    (StatusCode::INTERNAL_SERVER_ERROR, code, None)
                }
            }

            // 502 Bad Gateway
            AppError::DataUnavailable(e) => {
                tracing::error!("Catalog fetch failed: {}", e);
                (StatusCode::BAD_GATEWAY, "data_unavailable", None)
            }

        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::source::SourceError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::OwnerNotFound("alice".into()), StatusCode::NOT_FOUND),
            (
                AppError::Domain(DomainError::InvalidAmount("-1".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::DataUnavailable(SourceError::NotACollection { collection: "courses" }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Domain(DomainError::invalid_ratio(rust_decimal::Decimal::TWO)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_data_unavailable_message() {
        let err = AppError::from(SourceError::Status {
            status: 500,
            url: "http://lms.local/courses".into(),
        });
        assert!(err.to_string().starts_with("Report data unavailable"));
    }
}
