//! Learning progress repository port.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::learner::{ProgressPatch, UserProgress};

use super::StoreError;

/// Lazily created per-user progress records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// The user's progress. Returns `None` if no activity was ever recorded.
    async fn get_user_progress(&self, user_id: &UserId)
        -> Result<Option<UserProgress>, StoreError>;

    /// Merge `patch` over the existing record, or over an empty one if the
    /// user has none yet. Always refreshes `last_activity`.
    async fn update_user_progress(
        &self,
        user_id: &UserId,
        patch: ProgressPatch,
    ) -> Result<UserProgress, StoreError>;
}
