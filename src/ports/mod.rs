//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Completion Provider
//!
//! - `AIProvider` - External language-model completions
//!
//! ## Entity Store
//!
//! - `UserRepository`, `SessionRepository`, `RiskAssessmentRepository`,
//!   `ProgressRepository` - Keyed learner state
//!
//! ## Logging
//!
//! - `LogSink` - Destination for structured log entries

mod ai_provider;
mod assessment_repository;
mod log_sink;
mod progress_repository;
mod session_repository;
mod store_error;
mod user_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use assessment_repository::RiskAssessmentRepository;
pub use log_sink::LogSink;
pub use progress_repository::ProgressRepository;
pub use session_repository::SessionRepository;
pub use store_error::StoreError;
pub use user_repository::UserRepository;
