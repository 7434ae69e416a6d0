//! Scoreboard API: error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scoreboard_core::error::DomainError;
use scoreboard_ingest::error::IngestError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The score stream client could not be built.
    #[error("score stream client error: {0}")]
    StreamClient(#[from] IngestError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::StudentNotFound(_) => (StatusCode::NOT_FOUND, "student_not_found"),
            DomainError::ExamNotFound(_) => (StatusCode::NOT_FOUND, "exam_not_found"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::EmptyAggregate { .. } => {
                error!(err = %self.0, "internal consistency fault while serving request");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_consistency_fault")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use scoreboard_core::error::AggregateKind;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_student_not_found_maps_to_404() {
        assert_eq!(
            status_of(DomainError::StudentNotFound("John.Doe".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_exam_not_found_maps_to_404() {
        assert_eq!(status_of(DomainError::ExamNotFound(7)), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_empty_aggregate_maps_to_500() {
        assert_eq!(
            status_of(DomainError::EmptyAggregate {
                kind: AggregateKind::Exam,
                key: "7".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
