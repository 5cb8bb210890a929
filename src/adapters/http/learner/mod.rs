//! HTTP adapter for learner profile, session, assessment, and progress
//! endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CompleteModuleRequest, CompleteModuleResponse, FinishSessionRequest, OfferingResponse,
    ProgressResponse, ProgressUpdateRequest, RegisterUserRequest, RiskAssessmentRequest,
    RiskAssessmentResponse, RiskEvaluationResponse, RiskLevelResponse, SessionResponse,
    StartSessionRequest, UpdateUserRequest, UserResponse,
};
pub use handlers::LearnerHandlers;
pub use routes::learner_routes;
