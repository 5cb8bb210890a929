//! Session repository port.
//!
//! Status transitions are not enforced here; callers close sessions through
//! `Session::finish`, which rejects changes to terminal sessions.

use async_trait::async_trait;

use crate::domain::foundation::{SessionId, UserId};
use crate::domain::learner::{NewSession, Session, SessionPatch};

use super::StoreError;

/// Keyed storage for guidance sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session under a freshly generated, time-ordered id.
    async fn create_session(&self, session: NewSession) -> Result<Session, StoreError>;

    /// Find a session by id. Returns `None` if not found.
    async fn get_session(&self, session_id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// Merge `patch` over the stored session.
    ///
    /// Returns `None` if the session does not exist.
    async fn update_session(
        &self,
        session_id: &SessionId,
        patch: SessionPatch,
    ) -> Result<Option<Session>, StoreError>;

    /// All sessions owned by a user. Order is not guaranteed.
    async fn get_user_sessions(&self, user_id: &UserId) -> Result<Vec<Session>, StoreError>;

    /// All stored sessions, in no particular order.
    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError>;
}
