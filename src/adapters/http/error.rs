//! Mapping of domain errors onto HTTP responses.
//!
//! Every handler returns `Result<_, ApiError>`; this is the only place that
//! decides status codes.

use std::collections::BTreeMap;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::SyncError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// JSON error body: `{"code", "message", "details"}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: BTreeMap::new(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details: err.details.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(self.0.code)
    }

    /// 400 for a request body or path that could not be parsed.
    pub fn bad_request(field: &str, message: impl Into<String>) -> Self {
        Self(DomainError::validation(field, message))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        Self(err.into())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::ProfileNotFound | ErrorCode::SkillNotFound | ErrorCode::GitHubUserNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
        ErrorCode::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse::from(&self.0);

        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "Request failed");
        } else {
            tracing::debug!(code = %self.0.code, message = %self.0.message, "Request rejected");
        }

        // Storage errors carry driver text; clients get a generic message.
        let body = match self.0.code {
            ErrorCode::DatabaseError | ErrorCode::InternalError => ErrorResponse::new(
                body.code,
                "An unexpected error occurred",
            ),
            _ => body,
        };

        let retry_after = self
            .0
            .details
            .get("retry_after_secs")
            .filter(|_| self.0.code == ErrorCode::RateLimited)
            .and_then(|secs| HeaderValue::from_str(secs).ok());

        let mut response = (status, Json(body)).into_response();
        if let Some(value) = retry_after {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        response
    }
}
