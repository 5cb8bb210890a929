//! Read-side lookups for learner state.

use std::sync::Arc;

use crate::application::error_classifier::Failure;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::learner::{RiskAssessment, Session, User, UserProgress};
use crate::ports::{ProgressRepository, RiskAssessmentRepository, SessionRepository, UserRepository};

/// Query handler bundling the learner read paths.
///
/// Missing users and sessions are reported as not-found; a learner with no
/// assessment or progress yet simply gets `None`.
pub struct LearnerQueries {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    assessments: Arc<dyn RiskAssessmentRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl LearnerQueries {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        assessments: Arc<dyn RiskAssessmentRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            users,
            sessions,
            assessments,
            progress,
        }
    }

    pub async fn user(&self, user_id: &UserId) -> Result<User, Failure> {
        self.users.get_user(user_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", user_id)).into()
        })
    }

    pub async fn session(&self, session_id: &SessionId) -> Result<Session, Failure> {
        self.sessions.get_session(session_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session {} not found", session_id),
            )
            .into()
        })
    }

    /// The learner's sessions, most recent first.
    pub async fn user_sessions(&self, user_id: &UserId) -> Result<Vec<Session>, Failure> {
        let mut sessions = self.sessions.get_user_sessions(user_id).await?;
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(sessions)
    }

    pub async fn risk_assessment(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RiskAssessment>, Failure> {
        Ok(self.assessments.get_risk_assessment(user_id).await?)
    }

    pub async fn progress(&self, user_id: &UserId) -> Result<Option<UserProgress>, Failure> {
        Ok(self.progress.get_user_progress(user_id).await?)
    }

    pub async fn all_users(&self) -> Result<Vec<User>, Failure> {
        Ok(self.users.list_users().await?)
    }

    pub async fn all_sessions(&self) -> Result<Vec<Session>, Failure> {
        Ok(self.sessions.list_sessions().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEntityStore, SAMPLE_USER_ID};
    use crate::application::error_classifier::{classify, ErrorKind};
    use crate::domain::foundation::Timestamp;
    use crate::domain::learner::NewSession;

    fn queries(store: &Arc<InMemoryEntityStore>) -> LearnerQueries {
        LearnerQueries::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn finds_seeded_learner() {
        let store = Arc::new(InMemoryEntityStore::new());
        store.seed_sample_data().await.unwrap();
        let q = queries(&store);
        let user_id = UserId::new(SAMPLE_USER_ID).unwrap();

        assert_eq!(q.user(&user_id).await.unwrap().user_id, user_id);
        assert_eq!(q.progress(&user_id).await.unwrap().unwrap().total_time_spent, 45);
        assert!(q.risk_assessment(&user_id).await.unwrap().is_none());
        assert_eq!(q.all_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let store = Arc::new(InMemoryEntityStore::new());

        let failure = queries(&store)
            .user(&UserId::new("ghost").unwrap())
            .await
            .unwrap_err();

        assert_eq!(classify(&failure).kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn user_sessions_are_newest_first() {
        let store = Arc::new(InMemoryEntityStore::new());
        let user_id = UserId::new("alice").unwrap();
        let base = Timestamp::now();
        for offset in [0, 20, 10] {
            store
                .create_session(
                    NewSession::new(user_id.clone(), "Basics", 10)
                        .started_at(base.plus_minutes(offset)),
                )
                .await
                .unwrap();
        }

        let sessions = queries(&store).user_sessions(&user_id).await.unwrap();

        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].started_at, base.plus_minutes(20));
        assert_eq!(sessions[2].started_at, base);
        assert_eq!(queries(&store).all_sessions().await.unwrap().len(), 3);
    }
}
