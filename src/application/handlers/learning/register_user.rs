//! RegisterUserHandler - Creates a learner profile on first interaction.

use std::sync::Arc;

use crate::application::error_classifier::Failure;
use crate::application::Logger;
use crate::domain::foundation::{Percentage, UserId};
use crate::domain::learner::{NewUser, User};
use crate::ports::UserRepository;

/// Command to register a learner.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub user_id: UserId,
    pub external_id: Option<String>,
    pub onboarding_progress: Option<Percentage>,
}

impl RegisterUserCommand {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            external_id: None,
            onboarding_progress: None,
        }
    }
}

/// Handler for learner registration.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    logger: Logger,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, logger: Logger) -> Self {
        Self { users, logger }
    }

    /// # Errors
    ///
    /// - `Store(DuplicateKey)` if the id is already registered
    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, Failure> {
        let mut new_user = NewUser::new(cmd.user_id);
        if let Some(external_id) = cmd.external_id.filter(|id| !id.trim().is_empty()) {
            new_user = new_user.with_external_id(external_id);
        }
        if let Some(progress) = cmd.onboarding_progress {
            new_user = new_user.with_onboarding_progress(progress);
        }

        let user = self.users.create_user(new_user).await?;
        self.logger
            .user_action("registered", Some(&user.user_id), None);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::InMemoryLogSink;
    use crate::adapters::memory::InMemoryEntityStore;
    use crate::application::error_classifier::{classify, ErrorKind};
    use http::StatusCode;

    fn setup() -> (RegisterUserHandler, InMemoryLogSink) {
        let sink = InMemoryLogSink::new();
        let handler = RegisterUserHandler::new(
            Arc::new(InMemoryEntityStore::new()),
            Logger::new(Arc::new(sink.clone()), false),
        );
        (handler, sink)
    }

    fn cmd(id: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(UserId::new(id).unwrap())
    }

    #[tokio::test]
    async fn registers_new_learner() {
        let (handler, sink) = setup();

        let user = handler
            .handle(RegisterUserCommand {
                external_id: Some("fc-42".into()),
                onboarding_progress: Some(Percentage::new(10)),
                ..cmd("alice")
            })
            .await
            .unwrap();

        assert_eq!(user.external_id.as_deref(), Some("fc-42"));
        assert_eq!(user.onboarding_progress, Percentage::new(10));
        assert!(user.risk_tolerance_score.is_none());
        assert!(sink.contains_message("User action: registered"));
    }

    #[tokio::test]
    async fn blank_external_id_is_ignored() {
        let (handler, _) = setup();

        let user = handler
            .handle(RegisterUserCommand {
                external_id: Some("  ".into()),
                ..cmd("alice")
            })
            .await
            .unwrap();

        assert!(user.external_id.is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let (handler, _) = setup();
        handler.handle(cmd("alice")).await.unwrap();

        let failure = handler.handle(cmd("alice")).await.unwrap_err();

        let classified = classify(&failure);
        assert_eq!(classified.kind, ErrorKind::DuplicateKey);
        assert_eq!(classified.status, StatusCode::CONFLICT);
    }
}
