//! Risk assessment handlers.

mod submit_risk_assessment;

pub use submit_risk_assessment::{
    SubmitRiskAssessmentCommand, SubmitRiskAssessmentHandler, SubmitRiskAssessmentResult,
};
