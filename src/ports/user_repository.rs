//! User repository port.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::learner::{NewUser, User, UserPatch};

use super::StoreError;

/// Keyed storage for learner accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user, stamping `created_at` and `updated_at`.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` if the user id is already taken
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Find a user by id. Returns `None` if not found.
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, StoreError>;

    /// Merge `patch` over the stored user and refresh `updated_at`.
    ///
    /// Returns `None` if the user does not exist.
    async fn update_user(
        &self,
        user_id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, StoreError>;

    /// All stored users, in no particular order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
}
