//! FinishSessionHandler - Completes or cancels an active session.
//!
//! The store accepts any patch; the active-to-terminal rule is enforced here
//! through `Session::finish`.

use serde_json::json;
use std::sync::Arc;

use crate::application::error_classifier::{AppError, Failure};
use crate::application::Logger;
use crate::domain::foundation::{
    DomainError, ErrorCode, SessionId, SessionStatus, Timestamp, UserId,
};
use crate::domain::learner::Session;
use crate::ports::SessionRepository;
use http::StatusCode;

/// Command to close a session.
#[derive(Debug, Clone)]
pub struct FinishSessionCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Terminal status to move to.
    pub outcome: SessionStatus,
}

impl FinishSessionCommand {
    pub fn complete(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            session_id,
            user_id,
            outcome: SessionStatus::Completed,
        }
    }

    pub fn cancel(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            session_id,
            user_id,
            outcome: SessionStatus::Cancelled,
        }
    }
}

/// Handler for closing sessions.
pub struct FinishSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    logger: Logger,
}

impl FinishSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, logger: Logger) -> Self {
        Self { sessions, logger }
    }

    pub async fn handle(&self, cmd: FinishSessionCommand) -> Result<Session, Failure> {
        // 1. Load session
        let session = self
            .sessions
            .get_session(&cmd.session_id)
            .await?
            .ok_or_else(|| session_not_found(&cmd.session_id))?;

        // 2. Authorize - user must be owner
        if session.user_id != cmd.user_id {
            return Err(AppError::new(
                StatusCode::FORBIDDEN,
                "Session belongs to another user",
            )
            .into());
        }

        // 3. Transition
        let patch = session
            .finish(cmd.outcome, Timestamp::now())
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;

        // 4. Persist
        let updated = self
            .sessions
            .update_session(&cmd.session_id, patch)
            .await?
            .ok_or_else(|| session_not_found(&cmd.session_id))?;

        let action = match cmd.outcome {
            SessionStatus::Cancelled => "cancelled session",
            _ => "completed session",
        };
        self.logger.user_action(
            action,
            Some(&cmd.user_id),
            Some(json!({
                "sessionId": updated.session_id.as_str(),
                "durationMinutes": updated.duration_minutes(),
            })),
        );

        Ok(updated)
    }
}

fn session_not_found(session_id: &SessionId) -> Failure {
    DomainError::new(
        ErrorCode::SessionNotFound,
        format!("Session {} not found", session_id),
    )
    .into()
}
