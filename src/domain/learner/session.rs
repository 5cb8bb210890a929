//! Paid guidance sessions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    SessionId, SessionStatus, StateMachine, Timestamp, UserId, ValidationError,
};

/// A guidance session booked by a learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
    pub topic: String,
    /// Price in whole US dollars.
    pub cost_usd: u32,
    pub status: SessionStatus,
}

/// Caller-supplied fields for a new session; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub user_id: UserId,
    pub started_at: Timestamp,
    pub topic: String,
    pub cost_usd: u32,
    pub status: SessionStatus,
}

impl NewSession {
    /// An active session starting now.
    pub fn new(user_id: UserId, topic: impl Into<String>, cost_usd: u32) -> Self {
        Self {
            user_id,
            started_at: Timestamp::now(),
            topic: topic.into(),
            cost_usd,
            status: SessionStatus::Active,
        }
    }

    pub fn started_at(mut self, at: Timestamp) -> Self {
        self.started_at = at;
        self
    }

    pub fn into_session(self, session_id: SessionId) -> Session {
        Session {
            session_id,
            user_id: self.user_id,
            started_at: self.started_at,
            ended_at: None,
            topic: self.topic,
            cost_usd: self.cost_usd,
            status: self.status,
        }
    }
}

/// Partial update for a [`Session`]. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    pub ended_at: Option<Timestamp>,
    pub topic: Option<String>,
    pub cost_usd: Option<u32>,
    pub status: Option<SessionStatus>,
}

impl Session {
    /// Merges `patch` over this session. Identity and ownership never change.
    pub fn apply(&self, patch: SessionPatch) -> Session {
        Session {
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
            started_at: self.started_at,
            ended_at: patch.ended_at.or(self.ended_at),
            topic: patch.topic.unwrap_or_else(|| self.topic.clone()),
            cost_usd: patch.cost_usd.unwrap_or(self.cost_usd),
            status: patch.status.unwrap_or(self.status),
        }
    }

    /// Builds the patch that closes this session with `target` status.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the session is already in a terminal state
    /// or `target` is not a terminal state.
    pub fn finish(
        &self,
        target: SessionStatus,
        at: Timestamp,
    ) -> Result<SessionPatch, ValidationError> {
        let status = self.status.transition_to(target)?;
        Ok(SessionPatch {
            ended_at: Some(at),
            status: Some(status),
            ..Default::default()
        })
    }

    /// Length of the session in whole minutes, if it has ended.
    pub fn duration_minutes(&self) -> Option<u32> {
        self.ended_at
            .map(|end| end.duration_since(&self.started_at).num_minutes().max(0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        NewSession::new(UserId::new("u-1").unwrap(), "Wallet setup", 20)
            .started_at(Timestamp::from_unix_secs(1_000))
            .into_session(SessionId::generate())
    }

    #[test]
    fn new_session_is_active_and_open() {
        let s = session();
        assert_eq!(s.status, SessionStatus::Active);
        assert!(s.ended_at.is_none());
        assert!(s.duration_minutes().is_none());
    }

    #[test]
    fn finish_sets_end_time_and_status() {
        let s = session();
        let end = Timestamp::from_unix_secs(1_000).plus_minutes(30);

        let closed = s.apply(s.finish(SessionStatus::Completed, end).unwrap());

        assert_eq!(closed.status, SessionStatus::Completed);
        assert_eq!(closed.ended_at, Some(end));
        assert_eq!(closed.duration_minutes(), Some(30));
        assert_eq!(closed.session_id, s.session_id);
    }

    #[test]
    fn finish_rejects_terminal_sessions() {
        let s = session();
        let closed = s.apply(s.finish(SessionStatus::Cancelled, Timestamp::now()).unwrap());

        assert!(closed.finish(SessionStatus::Completed, Timestamp::now()).is_err());
    }

    #[test]
    fn finish_rejects_non_terminal_target() {
        assert!(session().finish(SessionStatus::Active, Timestamp::now()).is_err());
    }

    #[test]
    fn apply_keeps_unspecified_fields() {
        let s = session();
        let patched = s.apply(SessionPatch {
            topic: Some("Scam masterclass".into()),
            ..Default::default()
        });
        assert_eq!(patched.topic, "Scam masterclass");
        assert_eq!(patched.cost_usd, 20);
        assert_eq!(patched.status, SessionStatus::Active);
    }
}
