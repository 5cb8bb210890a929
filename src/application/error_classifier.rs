//! Failure classification at the handler boundary.
//!
//! Handlers return a tagged [`Failure`]; [`classify`] maps it once to the
//! caller-facing status and message. Internal detail stays in the
//! `Display` form of the failure, which is what gets logged.

use http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{AIError, StoreError};

pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub const UNAUTHENTICATED_MESSAGE: &str = "Authentication failed. Please check your API key.";
pub const DUPLICATE_KEY_MESSAGE: &str = "A record with this information already exists.";
pub const UNKNOWN_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// An error raised deliberately by application code, carrying the status
/// the caller should see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({status})")]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

/// Every way a handler can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    #[error("application error: {0}")]
    Application(AppError),

    #[error("provider error: {0}")]
    Provider(#[from] AIError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Failure {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<AppError> for Failure {
    fn from(err: AppError) -> Self {
        Failure::Application(err)
    }
}

impl From<ValidationError> for Failure {
    fn from(err: ValidationError) -> Self {
        Failure::Application(AppError::bad_request(err.to_string()))
    }
}

impl From<DomainError> for Failure {
    fn from(err: DomainError) -> Self {
        let status = match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidStateTransition => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::UserNotFound | ErrorCode::SessionNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => return Failure::Internal(err.message),
        };
        Failure::Application(AppError::new(status, err.message))
    }
}

/// Coarse category of a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller sent something unusable.
    Validation,
    /// The addressed entity does not exist.
    NotFound,
    /// Another application-chosen status.
    Rejected,
    Unauthenticated,
    RateLimited,
    DuplicateKey,
    Unknown,
}

/// Caller-facing outcome of classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub message: String,
}

impl ClassifiedError {
    fn new(kind: ErrorKind, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    fn unknown() -> Self {
        Self::new(
            ErrorKind::Unknown,
            StatusCode::INTERNAL_SERVER_ERROR,
            UNKNOWN_MESSAGE,
        )
    }
}

/// Maps a failure to its caller-facing form.
///
/// Priority: explicit application status, then provider 429 / 401, then
/// store conflicts, then a detail-free 500.
pub fn classify(failure: &Failure) -> ClassifiedError {
    match failure {
        Failure::Application(err) => {
            let kind = match err.status {
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
                StatusCode::NOT_FOUND => ErrorKind::NotFound,
                _ => ErrorKind::Rejected,
            };
            ClassifiedError::new(kind, err.status, err.message.clone())
        }
        Failure::Provider(err) => match err.provider_status() {
            Some(429) => ClassifiedError::new(
                ErrorKind::RateLimited,
                StatusCode::TOO_MANY_REQUESTS,
                RATE_LIMITED_MESSAGE,
            ),
            Some(401) => ClassifiedError::new(
                ErrorKind::Unauthenticated,
                StatusCode::UNAUTHORIZED,
                UNAUTHENTICATED_MESSAGE,
            ),
            _ => ClassifiedError::unknown(),
        },
        Failure::Store(err) if err.is_conflict() => ClassifiedError::new(
            ErrorKind::DuplicateKey,
            StatusCode::CONFLICT,
            DUPLICATE_KEY_MESSAGE,
        ),
        Failure::Store(_) | Failure::Internal(_) => ClassifiedError::unknown(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_status_passes_through() {
        let failure = Failure::from(AppError::new(StatusCode::FORBIDDEN, "Not yours"));

        let classified = classify(&failure);

        assert_eq!(classified.status, StatusCode::FORBIDDEN);
        assert_eq!(classified.message, "Not yours");
        assert_eq!(classified.kind, ErrorKind::Rejected);
    }

    #[test]
    fn validation_error_is_a_bad_request() {
        let failure = Failure::from(ValidationError::empty_field("message"));

        let classified = classify(&failure);

        assert_eq!(classified.kind, ErrorKind::Validation);
        assert_eq!(classified.status, StatusCode::BAD_REQUEST);
        assert_eq!(classified.message, "message is required");
    }

    #[test]
    fn provider_rate_limit_is_surfaced() {
        let classified = classify(&Failure::from(AIError::rate_limited(30)));

        assert_eq!(classified.kind, ErrorKind::RateLimited);
        assert_eq!(classified.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(classified.message, RATE_LIMITED_MESSAGE);
    }

    #[test]
    fn provider_auth_failure_is_surfaced() {
        let classified = classify(&Failure::from(AIError::AuthenticationFailed));

        assert_eq!(classified.kind, ErrorKind::Unauthenticated);
        assert_eq!(classified.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn other_provider_errors_hide_detail() {
        let failure = Failure::from(AIError::unavailable("upstream exploded at 10.0.0.3"));

        let classified = classify(&failure);

        assert_eq!(classified.kind, ErrorKind::Unknown);
        assert_eq!(classified.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(classified.message, UNKNOWN_MESSAGE);
        assert!(failure.to_string().contains("10.0.0.3"));
    }

    #[test]
    fn provider_bad_request_is_not_a_caller_fault() {
        let classified = classify(&Failure::from(AIError::InvalidRequest("bad".into())));
        assert_eq!(classified.kind, ErrorKind::Unknown);
    }

    #[test]
    fn store_conflict_is_duplicate_key() {
        let classified = classify(&Failure::from(StoreError::duplicate("user", "u1")));

        assert_eq!(classified.kind, ErrorKind::DuplicateKey);
        assert_eq!(classified.status, StatusCode::CONFLICT);
        assert_eq!(classified.message, DUPLICATE_KEY_MESSAGE);
    }

    #[test]
    fn internal_errors_are_unknown() {
        let classified = classify(&Failure::internal("invariant broken"));
        assert_eq!(classified, ClassifiedError::unknown());
    }

    #[test]
    fn domain_errors_map_by_code() {
        let not_found = Failure::from(DomainError::new(ErrorCode::UserNotFound, "no user"));
        assert_eq!(classify(&not_found).status, StatusCode::NOT_FOUND);

        let transition = Failure::from(DomainError::new(
            ErrorCode::InvalidStateTransition,
            "already completed",
        ));
        assert_eq!(classify(&transition).status, StatusCode::BAD_REQUEST);

        let internal = Failure::from(DomainError::new(ErrorCode::InternalError, "x"));
        assert_eq!(classify(&internal).kind, ErrorKind::Unknown);
    }
}
