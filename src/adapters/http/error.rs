//! Shared error body and failure-to-response mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::{classify, ErrorKind, Failure};
use crate::domain::foundation::ValidationError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Wraps a handler failure so it can be returned from an axum handler.
///
/// The full failure is traced before classification strips it down to the
/// caller-facing message.
#[derive(Debug)]
pub struct ApiError(pub Failure);

impl From<Failure> for ApiError {
    fn from(err: Failure) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let classified = classify(&self.0);
        match classified.kind {
            ErrorKind::Unknown => tracing::error!(error = %self.0, "request failed"),
            _ => tracing::debug!(error = %self.0, status = %classified.status, "request rejected"),
        }
        (classified.status, Json(ErrorResponse::new(classified.message))).into_response()
    }
}

/// Maps a malformed JSON body to a 400 with the shared error shape.
pub fn json_rejection(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Invalid request body")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::ports::{AIError, StoreError};

    #[test]
    fn validation_failure_maps_to_400() {
        let response = ApiError(AppError::bad_request("Message is required").into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rate_limited_provider_maps_to_429() {
        let response = ApiError(AIError::rate_limited(30).into()).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn duplicate_key_maps_to_409() {
        let response = ApiError(StoreError::duplicate("user", "u1").into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_failure_maps_to_500() {
        let response = ApiError(Failure::internal("lock poisoned")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
