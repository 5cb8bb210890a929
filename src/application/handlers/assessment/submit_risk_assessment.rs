//! SubmitRiskAssessmentHandler - Scores a questionnaire submission and
//! records it against the learner.

use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::error_classifier::Failure;
use crate::application::Logger;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::learner::{RiskAssessment, UserPatch};
use crate::domain::risk::{evaluate, validate_answers, RiskEvaluation};
use crate::ports::{RiskAssessmentRepository, UserRepository};

/// Command carrying one questionnaire submission.
#[derive(Debug, Clone)]
pub struct SubmitRiskAssessmentCommand {
    pub user_id: UserId,
    /// Question id to selected option value.
    pub answers: BTreeMap<String, u8>,
}

/// Result of a scored submission.
#[derive(Debug, Clone)]
pub struct SubmitRiskAssessmentResult {
    pub assessment: RiskAssessment,
    pub evaluation: RiskEvaluation,
    /// True when the learner's profile now carries the new score.
    pub profile_updated: bool,
}

/// Handler for risk questionnaire submissions.
pub struct SubmitRiskAssessmentHandler {
    assessments: Arc<dyn RiskAssessmentRepository>,
    users: Arc<dyn UserRepository>,
    logger: Logger,
}

impl SubmitRiskAssessmentHandler {
    pub fn new(
        assessments: Arc<dyn RiskAssessmentRepository>,
        users: Arc<dyn UserRepository>,
        logger: Logger,
    ) -> Self {
        Self {
            assessments,
            users,
            logger,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitRiskAssessmentCommand,
    ) -> Result<SubmitRiskAssessmentResult, Failure> {
        // 1. Validate
        if cmd.answers.is_empty() {
            return Err(ValidationError::empty_field("answers").into());
        }
        validate_answers(&cmd.answers)?;

        // 2. Score
        let evaluation = evaluate(&cmd.answers);

        // 3. Persist (replaces any earlier submission)
        let assessment = self
            .assessments
            .save_risk_assessment(RiskAssessment {
                user_id: cmd.user_id.clone(),
                answers: cmd.answers,
                score: evaluation.score,
                recommendations: evaluation.recommendations.clone(),
                completed_at: Timestamp::now(),
            })
            .await?;

        // 4. Mirror the score onto the profile, if there is one
        let profile_updated = self
            .users
            .update_user(&cmd.user_id, UserPatch::risk_tolerance_score(evaluation.score))
            .await?
            .is_some();

        self.logger.user_action(
            "completed risk assessment",
            Some(&cmd.user_id),
            Some(json!({
                "score": evaluation.score.value(),
                "level": evaluation.level.label(),
            })),
        );

        Ok(SubmitRiskAssessmentResult {
            assessment,
            evaluation,
            profile_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::InMemoryLogSink;
    use crate::adapters::memory::InMemoryEntityStore;
    use crate::application::error_classifier::{classify, ErrorKind};
    use crate::domain::foundation::Percentage;
    use crate::domain::learner::NewUser;
    use crate::domain::logging::LogContext;
    use crate::domain::risk::RiskLevel;

    fn setup() -> (SubmitRiskAssessmentHandler, Arc<InMemoryEntityStore>, InMemoryLogSink) {
        let store = Arc::new(InMemoryEntityStore::new());
        let sink = InMemoryLogSink::new();
        let handler = SubmitRiskAssessmentHandler::new(
            store.clone(),
            store.clone(),
            Logger::new(Arc::new(sink.clone()), false),
        );
        (handler, store, sink)
    }

    fn uid() -> UserId {
        UserId::new("learner-1").unwrap()
    }

    fn answers(pairs: &[(&str, u8)]) -> BTreeMap<String, u8> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn scores_and_stores_submission() {
        let (handler, store, _) = setup();

        let result = handler
            .handle(SubmitRiskAssessmentCommand {
                user_id: uid(),
                answers: answers(&[("experience", 2), ("risk-tolerance", 2), ("investment-amount", 2)]),
            })
            .await
            .unwrap();

        assert_eq!(result.evaluation.score, Percentage::new(50));
        assert_eq!(result.evaluation.level, RiskLevel::Moderate);
        assert_eq!(result.assessment.recommendations.len(), 9);
        assert!(!result.profile_updated);

        let stored = store.get_risk_assessment(&uid()).await.unwrap().unwrap();
        assert_eq!(stored, result.assessment);
    }

    #[tokio::test]
    async fn updates_existing_profile_score() {
        let (handler, store, sink) = setup();
        store.create_user(NewUser::new(uid())).await.unwrap();

        let result = handler
            .handle(SubmitRiskAssessmentCommand {
                user_id: uid(),
                answers: answers(&[("experience", 4), ("risk-tolerance", 4)]),
            })
            .await
            .unwrap();

        assert!(result.profile_updated);
        let user = store.get_user(&uid()).await.unwrap().unwrap();
        assert_eq!(user.risk_tolerance_score, Some(Percentage::HUNDRED));
        assert!(sink.contains_message("User action: completed risk assessment"));
        assert_eq!(sink.with_context(LogContext::UserAction).len(), 1);
    }

    #[tokio::test]
    async fn resubmission_replaces_previous() {
        let (handler, store, _) = setup();
        for value in [1, 4] {
            handler
                .handle(SubmitRiskAssessmentCommand {
                    user_id: uid(),
                    answers: answers(&[("experience", value)]),
                })
                .await
                .unwrap();
        }

        let stored = store.get_risk_assessment(&uid()).await.unwrap().unwrap();
        assert_eq!(stored.score, Percentage::HUNDRED);
    }

    #[tokio::test]
    async fn rejects_out_of_range_answers_without_saving() {
        let (handler, store, _) = setup();

        let failure = handler
            .handle(SubmitRiskAssessmentCommand {
                user_id: uid(),
                answers: answers(&[("experience", 5)]),
            })
            .await
            .unwrap_err();

        assert_eq!(classify(&failure).kind, ErrorKind::Validation);
        assert!(store.get_risk_assessment(&uid()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_empty_submission() {
        let (handler, _, _) = setup();

        let failure = handler
            .handle(SubmitRiskAssessmentCommand {
                user_id: uid(),
                answers: BTreeMap::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(classify(&failure).message, "answers is required");
    }
}
