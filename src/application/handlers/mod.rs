//! Command and query handlers.

pub mod assessment;
pub mod chat;
pub mod learning;

pub use assessment::{
    SubmitRiskAssessmentCommand, SubmitRiskAssessmentHandler, SubmitRiskAssessmentResult,
};
pub use chat::{
    AdviceSettings, AdviceStage, SubmitChatMessageCommand, SubmitChatMessageHandler,
    SubmitChatMessageResult,
};
pub use learning::{
    CompleteModuleCommand, CompleteModuleHandler, CompleteModuleResult, FinishSessionCommand,
    FinishSessionHandler, LearnerQueries, QuizScore, RecordProgressCommand,
    RecordProgressHandler, RegisterUserCommand, RegisterUserHandler, StartSessionCommand,
    StartSessionHandler, UpdateUserCommand, UpdateUserHandler,
};
