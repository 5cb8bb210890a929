//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the guidance domain.

mod errors;
mod ids;
mod percentage;
mod session_status;
mod state_machine;
mod timestamp;

pub use errors::{validate_required, DomainError, ErrorCode, ValidationError};
pub use ids::{SessionId, UserId};
pub use percentage::Percentage;
pub use session_status::SessionStatus;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
