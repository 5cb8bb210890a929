//! UpdateUserHandler - Applies a partial update to a learner profile.

use std::sync::Arc;

use crate::application::error_classifier::{AppError, Failure};
use crate::domain::foundation::UserId;
use crate::domain::learner::{User, UserPatch};
use crate::ports::UserRepository;

/// Command to patch a learner profile.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub patch: UserPatch,
}

/// Handler for profile updates.
pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<User, Failure> {
        self.users
            .update_user(&cmd.user_id, cmd.patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", cmd.user_id)).into())
    }
}
