//! HTTP DTOs for learner endpoints.
//!
//! Wire names are camelCase; the domain types stay snake_case internally.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::application::handlers::learning::{CompleteModuleResult, QuizScore};
use crate::application::handlers::SubmitRiskAssessmentResult;
use crate::domain::foundation::{Percentage, SessionStatus, Timestamp};
use crate::domain::learner::{
    Offering, ProgressPatch, RiskAssessment, Session, User, UserPatch, UserProgress,
};
use crate::domain::risk::RiskLevel;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to register a learner.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub user_id: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub onboarding_progress: Option<Percentage>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub onboarding_progress: Option<Percentage>,
    #[serde(default)]
    pub risk_tolerance_score: Option<Percentage>,
    #[serde(default)]
    pub purchased_features: Option<BTreeSet<String>>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            external_id: req.external_id,
            onboarding_progress: req.onboarding_progress,
            risk_tolerance_score: req.risk_tolerance_score,
            purchased_features: req.purchased_features,
        }
    }
}

/// Request to book a session for an offering.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub user_id: String,
    pub offering: Offering,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Request to complete or cancel a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishSessionRequest {
    pub user_id: String,
}

/// Questionnaire submission.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskAssessmentRequest {
    #[serde(default)]
    pub answers: BTreeMap<String, u8>,
}

/// Partial progress update. Sets replace the stored sets wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdateRequest {
    #[serde(default)]
    pub completed_modules: Option<BTreeSet<String>>,
    #[serde(default)]
    pub current_module: Option<String>,
    #[serde(default)]
    pub total_time_spent: Option<u32>,
    #[serde(default)]
    pub achievement_badges: Option<BTreeSet<String>>,
}

impl From<ProgressUpdateRequest> for ProgressPatch {
    fn from(req: ProgressUpdateRequest) -> Self {
        ProgressPatch {
            completed_modules: req.completed_modules,
            current_module: req.current_module,
            total_time_spent: req.total_time_spent,
            achievement_badges: req.achievement_badges,
        }
    }
}

/// Quiz result attached to a module completion.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct QuizScoreRequest {
    pub score: u32,
    pub total: u32,
}

/// Request to mark a module complete.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteModuleRequest {
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub quiz: Option<QuizScoreRequest>,
}

impl From<QuizScoreRequest> for QuizScore {
    fn from(req: QuizScoreRequest) -> Self {
        QuizScore {
            score: req.score,
            total: req.total,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Learner profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub onboarding_progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tolerance_score: Option<u8>,
    pub purchased_features: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            external_id: user.external_id,
            onboarding_progress: user.onboarding_progress.value(),
            risk_tolerance_score: user.risk_tolerance_score.map(|s| s.value()),
            purchased_features: user.purchased_features.into_iter().collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Guidance session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub user_id: String,
    pub topic: String,
    pub cost_usd: u32,
    pub status: SessionStatus,
    pub started_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        let duration_minutes = session.duration_minutes();
        Self {
            session_id: session.session_id.to_string(),
            user_id: session.user_id.to_string(),
            topic: session.topic,
            cost_usd: session.cost_usd,
            status: session.status,
            started_at: session.started_at,
            ended_at: session.ended_at,
            duration_minutes,
        }
    }
}

/// Risk band with its caller-facing wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLevelResponse {
    pub label: String,
    pub description: String,
}

impl From<RiskLevel> for RiskLevelResponse {
    fn from(level: RiskLevel) -> Self {
        Self {
            label: level.label().to_string(),
            description: level.description().to_string(),
        }
    }
}

/// Stored questionnaire result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentResponse {
    pub user_id: String,
    pub answers: BTreeMap<String, u8>,
    pub score: u8,
    pub level: RiskLevelResponse,
    pub recommendations: Vec<String>,
    pub completed_at: Timestamp,
}

impl From<RiskAssessment> for RiskAssessmentResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            user_id: assessment.user_id.to_string(),
            answers: assessment.answers,
            score: assessment.score.value(),
            level: RiskLevel::from_score(assessment.score).into(),
            recommendations: assessment.recommendations,
            completed_at: assessment.completed_at,
        }
    }
}

/// Result of a questionnaire submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEvaluationResponse {
    pub score: u8,
    pub level: RiskLevelResponse,
    pub recommendations: Vec<String>,
    pub profile_updated: bool,
    pub completed_at: Timestamp,
}

impl From<SubmitRiskAssessmentResult> for RiskEvaluationResponse {
    fn from(result: SubmitRiskAssessmentResult) -> Self {
        Self {
            score: result.evaluation.score.value(),
            level: result.evaluation.level.into(),
            recommendations: result.evaluation.recommendations,
            profile_updated: result.profile_updated,
            completed_at: result.assessment.completed_at,
        }
    }
}

/// Learning progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub user_id: String,
    pub completed_modules: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_module: Option<String>,
    pub total_time_spent: u32,
    pub achievement_badges: Vec<String>,
    pub last_activity: Timestamp,
}

impl From<UserProgress> for ProgressResponse {
    fn from(progress: UserProgress) -> Self {
        Self {
            user_id: progress.user_id.to_string(),
            completed_modules: progress.completed_modules.into_iter().collect(),
            current_module: progress.current_module,
            total_time_spent: progress.total_time_spent,
            achievement_badges: progress.achievement_badges.into_iter().collect(),
            last_activity: progress.last_activity,
        }
    }
}

/// Progress after a module completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteModuleResponse {
    pub progress: ProgressResponse,
    pub earned_first_badge: bool,
}

impl From<CompleteModuleResult> for CompleteModuleResponse {
    fn from(result: CompleteModuleResult) -> Self {
        Self {
            progress: result.progress.into(),
            earned_first_badge: result.earned_first_badge,
        }
    }
}

/// One entry of the offering catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingResponse {
    pub id: Offering,
    pub name: String,
    pub price_usd: u32,
}

impl From<Offering> for OfferingResponse {
    fn from(offering: Offering) -> Self {
        Self {
            id: offering,
            name: offering.topic().to_string(),
            price_usd: offering.price_usd(),
        }
    }
}
