//! HTTP error types for the Launchgate server.
//!
//! Maps workflow errors from `launchgate-core` into HTTP responses. Every
//! error variant produces a JSON body with a machine-readable `error` field
//! and a human-readable `message`, so the presentation layer can show a
//! specific correction hint instead of a blind "try again".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use launchgate_core::{BindError, IssueError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// A required field was empty or absent.
    MissingField(String),
    /// The access code fails the format screen.
    BadCodeFormat(String),
    /// The email address fails the format screen.
    BadEmailFormat(String),
    /// No registration matches the submitted pair.
    NotFound(String),
    /// The registration already has a seller assigned.
    AlreadyBound(String),
    /// The email already has a registration.
    AlreadyRegistered(String),
    /// The store failed; the caller may retry.
    Store(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::MissingField(msg) => (StatusCode::BAD_REQUEST, "missing-field", msg),
            Self::BadCodeFormat(msg) => (StatusCode::BAD_REQUEST, "bad-code-format", msg),
            Self::BadEmailFormat(msg) => (StatusCode::BAD_REQUEST, "bad-email-format", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not-found", msg),
            Self::AlreadyBound(msg) => (StatusCode::CONFLICT, "already-bound", msg),
            Self::AlreadyRegistered(msg) => (StatusCode::CONFLICT, "already-registered", msg),
            Self::Store(msg) => {
                tracing::error!(error = %msg, "store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store-error",
                    "the registration store is unavailable, please try again".to_owned(),
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        match err {
            IssueError::InvalidEmail(_) => Self::BadEmailFormat(err.to_string()),
            IssueError::AlreadyRegistered { .. } => Self::AlreadyRegistered(err.to_string()),
            IssueError::CodeCollision { .. } | IssueError::Store(_) => {
                Self::Store(err.to_string())
            }
        }
    }
}

impl From<BindError> for AppError {
    fn from(err: BindError) -> Self {
        match err {
            BindError::MissingField { .. } => Self::MissingField(err.to_string()),
            BindError::BadCodeFormat => Self::BadCodeFormat(err.to_string()),
            BindError::BadEmailFormat => Self::BadEmailFormat(err.to_string()),
            BindError::NotFound => Self::NotFound(err.to_string()),
            BindError::AlreadyBound => Self::AlreadyBound(err.to_string()),
            BindError::Store(_) => Self::Store(err.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_classes() {
        let cases = [
            (
                AppError::MissingField("m".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::BadCodeFormat("m".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::BadEmailFormat("m".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::NotFound("m".to_owned()), StatusCode::NOT_FOUND),
            (AppError::AlreadyBound("m".to_owned()), StatusCode::CONFLICT),
            (
                AppError::AlreadyRegistered("m".to_owned()),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Store("m".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn bind_errors_carry_their_reason_slug() {
        let response = AppError::from(BindError::AlreadyBound).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "already-bound");
    }

    #[tokio::test]
    async fn store_errors_hide_internal_detail() {
        let response = AppError::Store("connection refused at 10.0.0.3".to_owned()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"], "store-error");
        let message = body["message"].as_str().unwrap();
        assert!(!message.contains("10.0.0.3"));
    }
}
