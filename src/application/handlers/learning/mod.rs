//! Learner account, session, and progress handlers.

mod complete_module;
mod finish_session;
mod learner_queries;
mod record_progress;
mod register_user;
mod start_session;
mod update_user;

pub use complete_module::{
    CompleteModuleCommand, CompleteModuleHandler, CompleteModuleResult, QuizScore,
};
pub use finish_session::{FinishSessionCommand, FinishSessionHandler};
pub use learner_queries::LearnerQueries;
pub use record_progress::{RecordProgressCommand, RecordProgressHandler};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};
pub use start_session::{StartSessionCommand, StartSessionHandler};
pub use update_user::{UpdateUserCommand, UpdateUserHandler};
