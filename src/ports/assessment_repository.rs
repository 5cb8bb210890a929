//! Risk assessment repository port.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::learner::RiskAssessment;

use super::StoreError;

/// Upsert storage for risk assessments, one per user.
#[async_trait]
pub trait RiskAssessmentRepository: Send + Sync {
    /// Replace any previous assessment for the same user.
    async fn save_risk_assessment(
        &self,
        assessment: RiskAssessment,
    ) -> Result<RiskAssessment, StoreError>;

    /// The user's latest assessment. Returns `None` if never submitted.
    async fn get_risk_assessment(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RiskAssessment>, StoreError>;
}
