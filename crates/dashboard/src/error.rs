//! Unified error handling for the dashboard API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::AuthError;

/// Application-level error type for the JSON API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Login, registration or session check failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Request body or parameters are malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
                RepositoryError::Conflict { .. } => StatusCode::CONFLICT,
                RepositoryError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
                RepositoryError::Invalid(_) => StatusCode::BAD_REQUEST,
                RepositoryError::Storage(_)
                | RepositoryError::Serialization(_)
                | RepositoryError::DataCorruption(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::NotAuthenticated => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::UserExists => StatusCode::CONFLICT,
                AuthError::InvalidEmail(_) | AuthError::Invalid(_) => StatusCode::BAD_REQUEST,
                AuthError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(RepositoryError::NotFound {
            entity: "order",
            id: "ORD-123".to_string(),
        });
        assert_eq!(err.to_string(), "order not found: ORD-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(RepositoryError::NotFound {
                entity: "product",
                id: "x".to_string()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(RepositoryError::Conflict {
                entity: "product",
                id: "x".to_string(),
                expected: 1,
                found: 2
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(RepositoryError::InvalidReference("CUST-9".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(RepositoryError::Storage(StorageError::Poisoned)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AuthError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AuthError::UserExists), StatusCode::CONFLICT);
    }
}
