//! CompleteModuleHandler - Records a finished learning module and any quiz
//! taken at its end.

use serde_json::json;
use std::sync::Arc;

use crate::application::error_classifier::Failure;
use crate::application::Logger;
use crate::domain::foundation::{validate_required, Timestamp, UserId, ValidationError};
use crate::domain::learner::{UserProgress, FIRST_MODULE_BADGE};
use crate::ports::ProgressRepository;

/// Quiz result attached to a module completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub score: u32,
    pub total: u32,
}

#[derive(Debug, Clone)]
pub struct CompleteModuleCommand {
    pub user_id: UserId,
    pub module_id: String,
    /// Minutes spent on this module.
    pub minutes: u32,
    pub quiz: Option<QuizScore>,
}

/// Result of a module completion.
#[derive(Debug, Clone)]
pub struct CompleteModuleResult {
    pub progress: UserProgress,
    /// True when this completion earned the first-module badge.
    pub earned_first_badge: bool,
}

/// Handler for module completions.
pub struct CompleteModuleHandler {
    progress: Arc<dyn ProgressRepository>,
    logger: Logger,
}

impl CompleteModuleHandler {
    pub fn new(progress: Arc<dyn ProgressRepository>, logger: Logger) -> Self {
        Self { progress, logger }
    }

    pub async fn handle(&self, cmd: CompleteModuleCommand) -> Result<CompleteModuleResult, Failure> {
        // 1. Validate
        let module_id = validate_required(Some(cmd.module_id.as_str()), "moduleId")?.to_string();
        if let Some(quiz) = cmd.quiz {
            if quiz.score > quiz.total {
                return Err(ValidationError::out_of_range(
                    "quiz.score",
                    0,
                    i32::try_from(quiz.total).unwrap_or(i32::MAX),
                    i32::try_from(quiz.score).unwrap_or(i32::MAX),
                )
                .into());
            }
        }

        // 2. Build patch from the current record
        let current = self
            .progress
            .get_user_progress(&cmd.user_id)
            .await?
            .unwrap_or_else(|| UserProgress::empty(cmd.user_id.clone(), Timestamp::now()));
        let had_badge = current.achievement_badges.contains(FIRST_MODULE_BADGE);
        let patch = current.module_completion(&module_id, cmd.minutes);

        // 3. Persist
        let progress = self
            .progress
            .update_user_progress(&cmd.user_id, patch)
            .await?;

        // 4. Log
        if let Some(quiz) = cmd.quiz {
            self.logger
                .quiz_completion(&module_id, quiz.score, quiz.total, Some(&cmd.user_id));
        }
        self.logger.user_action(
            &format!("completed module {}", module_id),
            Some(&cmd.user_id),
            Some(json!({
                "minutes": cmd.minutes,
                "totalTimeSpent": progress.total_time_spent,
            })),
        );

        let earned_first_badge =
            !had_badge && progress.achievement_badges.contains(FIRST_MODULE_BADGE);
        Ok(CompleteModuleResult {
            progress,
            earned_first_badge,
        })
    }
}
