//! Risk module - pure scoring of the risk questionnaire.
//!
//! No state and no side effects: the same answers always produce the same
//! score, band, and recommendations.

mod engine;
mod questionnaire;

pub use engine::{
    classify_level, compute_score, evaluate, generate_recommendations, RiskEvaluation, RiskLevel,
    BASE_RECOMMENDATIONS, MAX_ANSWER_VALUE,
};
pub use questionnaire::{is_complete, validate_answers, AnswerOption, RiskQuestion, RISK_QUESTIONS};
