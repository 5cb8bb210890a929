//! RecordProgressHandler - Shallow-merges a progress update.

use std::sync::Arc;

use crate::application::error_classifier::Failure;
use crate::domain::foundation::UserId;
use crate::domain::learner::{ProgressPatch, UserProgress};
use crate::ports::ProgressRepository;

#[derive(Debug, Clone)]
pub struct RecordProgressCommand {
    pub user_id: UserId,
    pub patch: ProgressPatch,
}

/// Handler for raw progress updates.
pub struct RecordProgressHandler {
    progress: Arc<dyn ProgressRepository>,
}

impl RecordProgressHandler {
    pub fn new(progress: Arc<dyn ProgressRepository>) -> Self {
        Self { progress }
    }

    pub async fn handle(&self, cmd: RecordProgressCommand) -> Result<UserProgress, Failure> {
        Ok(self
            .progress
            .update_user_progress(&cmd.user_id, cmd.patch)
            .await?)
    }
}
