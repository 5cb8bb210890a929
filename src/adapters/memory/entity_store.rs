//! In-memory entity store.
//!
//! One process-local store backing every learner repository port. Each map
//! sits behind its own `tokio::sync::RwLock`, held only for the duration of
//! a single operation: concurrent updates to the same key resolve
//! last-write-wins, and nothing survives a restart.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

use crate::domain::foundation::{Percentage, SessionId, Timestamp, UserId};
use crate::domain::learner::{
    NewSession, NewUser, ProgressPatch, RiskAssessment, Session, SessionPatch, User, UserPatch,
    UserProgress, FIRST_MODULE_BADGE,
};
use crate::ports::{
    ProgressRepository, RiskAssessmentRepository, SessionRepository, StoreError, UserRepository,
};

/// Identifier of the demonstration learner created by [`InMemoryEntityStore::seed_sample_data`].
pub const SAMPLE_USER_ID: &str = "sample_user_1";

/// Process-local implementation of the learner repository ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryEntityStore::new());
///
/// let user = store.create_user(NewUser::new(user_id.clone())).await?;
/// let progress = store.update_user_progress(&user_id, ProgressPatch::default()).await?;
/// assert_eq!(progress.total_time_spent, 0);
/// ```
#[derive(Default)]
pub struct InMemoryEntityStore {
    users: RwLock<HashMap<UserId, User>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
    assessments: RwLock<HashMap<UserId, RiskAssessment>>,
    progress: RwLock<HashMap<UserId, UserProgress>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the demonstration learner and their progress.
    ///
    /// Safe to call more than once; an existing sample user is left alone.
    pub async fn seed_sample_data(&self) -> Result<(), StoreError> {
        let user_id = UserId::new(SAMPLE_USER_ID)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let sample = NewUser::new(user_id.clone())
            .with_external_id("sample_farcaster")
            .with_onboarding_progress(Percentage::new(25))
            .with_risk_tolerance_score(Percentage::new(65))
            .with_feature("basic_chat");

        match self.create_user(sample).await {
            Ok(_) => {}
            Err(StoreError::DuplicateKey { .. }) => return Ok(()),
            Err(other) => return Err(other),
        }

        let modules: BTreeSet<String> = ["crypto-basics", "blockchain-explained"]
            .into_iter()
            .map(String::from)
            .collect();

        self.update_user_progress(
            &user_id,
            ProgressPatch {
                completed_modules: Some(modules),
                total_time_spent: Some(45),
                achievement_badges: Some(BTreeSet::from([FIRST_MODULE_BADGE.to_string()])),
                ..ProgressPatch::default()
            },
        )
        .await?;

        tracing::info!(user_id = %user_id, "Sample data seeded");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryEntityStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user_id) {
            return Err(StoreError::duplicate("user", user.user_id.as_str()));
        }

        let user = user.into_user(Timestamp::now());
        users.insert(user.user_id.clone(), user.clone());
        tracing::debug!(user_id = %user.user_id, "User created");
        Ok(user)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn update_user(
        &self,
        user_id: &UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        let Some(existing) = users.get(user_id) else {
            return Ok(None);
        };

        let merged = existing.apply(patch, Timestamp::now());
        users.insert(user_id.clone(), merged.clone());
        Ok(Some(merged))
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl SessionRepository for InMemoryEntityStore {
    async fn create_session(&self, session: NewSession) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write().await;

        let mut session_id = SessionId::generate();
        while sessions.contains_key(&session_id) {
            session_id = SessionId::generate();
        }

        let session = session.into_session(session_id);
        sessions.insert(session.session_id.clone(), session.clone());
        tracing::debug!(
            session_id = %session.session_id,
            user_id = %session.user_id,
            "Session created"
        );
        Ok(session)
    }

    async fn get_session(&self, session_id: &SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn update_session(
        &self,
        session_id: &SessionId,
        patch: SessionPatch,
    ) -> Result<Option<Session>, StoreError> {
        let mut sessions = self.sessions.write().await;
        let Some(existing) = sessions.get(session_id) else {
            return Ok(None);
        };

        let merged = existing.apply(patch);
        sessions.insert(session_id.clone(), merged.clone());
        Ok(Some(merged))
    }

    async fn get_user_sessions(&self, user_id: &UserId) -> Result<Vec<Session>, StoreError> {
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, StoreError> {
        Ok(self.sessions.read().await.values().cloned().collect())
    }
}

#[async_trait]
impl RiskAssessmentRepository for InMemoryEntityStore {
    async fn save_risk_assessment(
        &self,
        assessment: RiskAssessment,
    ) -> Result<RiskAssessment, StoreError> {
        self.assessments
            .write()
            .await
            .insert(assessment.user_id.clone(), assessment.clone());
        Ok(assessment)
    }

    async fn get_risk_assessment(
        &self,
        user_id: &UserId,
    ) -> Result<Option<RiskAssessment>, StoreError> {
        Ok(self.assessments.read().await.get(user_id).cloned())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryEntityStore {
    async fn get_user_progress(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProgress>, StoreError> {
        Ok(self.progress.read().await.get(user_id).cloned())
    }

    async fn update_user_progress(
        &self,
        user_id: &UserId,
        patch: ProgressPatch,
    ) -> Result<UserProgress, StoreError> {
        let now = Timestamp::now();
        let mut progress = self.progress.write().await;

        let merged = match progress.get(user_id) {
            Some(existing) => existing.apply(patch, now),
            None => UserProgress::empty(user_id.clone(), now).apply(patch, now),
        };

        progress.insert(user_id.clone(), merged.clone());
        Ok(merged)
    }
}
