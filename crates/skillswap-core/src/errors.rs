//! Application error type and its HTTP representation.
//!
//! Every failure that reaches a handler boundary is an [`AppError`]: an
//! [`ErrorKind`] from the API's error taxonomy plus the underlying
//! [`anyhow::Error`] carrying the human-readable message.
//!
//! # Response Format
//!
//! ```json
//! { "status": "fail", "code": "DuplicateRequest", "message": "You have already sent a request to this user" }
//! ```
//!
//! Client errors (4xx) use the `fail` status; server errors (5xx) use
//! `error` and never leak internal details.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::response::ResponseStatus;

/// The error taxonomy exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum ErrorKind {
    ValidationError,
    DuplicateEmail,
    DuplicateRequest,
    SelfRequest,
    InvalidStatus,
    InvalidCredentials,
    Unauthenticated,
    Forbidden,
    NotFound,
    InternalError,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::DuplicateEmail
            | Self::DuplicateRequest
            | Self::SelfRequest
            | Self::InvalidStatus => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "ValidationError",
            Self::DuplicateEmail => "DuplicateEmail",
            Self::DuplicateRequest => "DuplicateRequest",
            Self::SelfRequest => "SelfRequest",
            Self::InvalidStatus => "InvalidStatus",
            Self::InvalidCredentials => "InvalidCredentials",
            Self::Unauthenticated => "Unauthenticated",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "NotFound",
            Self::InternalError => "InternalError",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

/// Error envelope as serialized on the wire.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub code: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status_code()
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::ValidationError, err)
    }

    pub fn duplicate_email() -> Self {
        Self::new(
            ErrorKind::DuplicateEmail,
            anyhow::anyhow!("Email is already registered"),
        )
    }

    pub fn duplicate_request() -> Self {
        Self::new(
            ErrorKind::DuplicateRequest,
            anyhow::anyhow!("You have already sent a request to this user"),
        )
    }

    pub fn self_request() -> Self {
        Self::new(
            ErrorKind::SelfRequest,
            anyhow::anyhow!("You cannot send a request to yourself"),
        )
    }

    pub fn invalid_status<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidStatus, err)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorKind::InvalidCredentials,
            anyhow::anyhow!("Incorrect email or password"),
        )
    }

    pub fn unauthenticated(message: String) -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InternalError, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow::anyhow!(message))
    }

    /// The message shown to the caller. Internal errors are masked.
    pub fn public_message(&self) -> String {
        match self.kind {
            ErrorKind::InternalError => "Something went wrong".to_string(),
            _ => self.error.to_string(),
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        let status = if self.status().is_server_error() {
            ResponseStatus::Error
        } else {
            ResponseStatus::Fail
        };

        ErrorResponse {
            status,
            code: self.kind,
            message: self.public_message(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::InternalError {
            tracing::error!(error = ?self.error, "Internal server error");
        }

        (self.status(), Json(self.to_response_body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            ErrorKind::ValidationError.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorKind::DuplicateRequest.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorKind::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorKind::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorKind::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorKind::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorKind::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_error_body_uses_fail_status() {
        let body = AppError::self_request().to_response_body();
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], "fail");
        assert_eq!(json["code"], "SelfRequest");
        assert_eq!(json["message"], "You cannot send a request to yourself");
    }

    #[test]
    fn test_internal_error_masks_details() {
        let err = AppError::internal(anyhow::anyhow!("connection refused on 10.0.0.3:5432"));
        let json = serde_json::to_value(err.to_response_body()).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "InternalError");
        assert_eq!(json["message"], "Something went wrong");
    }

    #[test]
    fn test_foreign_errors_become_internal() {
        let io = std::io::Error::other("disk full");
        let err: AppError = io.into();
        assert_eq!(err.kind, ErrorKind::InternalError);
    }

    #[test]
    fn test_invalid_credentials_message_is_uniform() {
        assert_eq!(
            AppError::invalid_credentials().public_message(),
            "Incorrect email or password"
        );
    }
}
