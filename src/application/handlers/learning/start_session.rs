//! StartSessionHandler - Books a priced guidance session.

use serde_json::json;
use std::sync::Arc;

use crate::application::error_classifier::Failure;
use crate::application::Logger;
use crate::domain::foundation::UserId;
use crate::domain::learner::{NewSession, Offering, Session};
use crate::ports::SessionRepository;

/// Command to start a session for an offering.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub user_id: UserId,
    pub offering: Offering,
    /// Overrides the offering's default topic label.
    pub topic: Option<String>,
}

/// Handler for starting guidance sessions.
pub struct StartSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    logger: Logger,
}

impl StartSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, logger: Logger) -> Self {
        Self { sessions, logger }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<Session, Failure> {
        let topic = cmd
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(cmd.offering.topic())
            .to_string();
        let price = cmd.offering.price_usd();

        let session = self
            .sessions
            .create_session(NewSession::new(cmd.user_id.clone(), topic, price))
            .await?;

        self.logger.payment_event(
            "session purchased",
            Some(price),
            Some(&cmd.user_id),
            Some(json!({
                "offering": cmd.offering,
                "sessionId": session.session_id.as_str(),
            })),
        );

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::InMemoryLogSink;
    use crate::adapters::memory::InMemoryEntityStore;
    use crate::domain::foundation::SessionStatus;
    use crate::domain::logging::LogContext;

    fn setup() -> (StartSessionHandler, Arc<InMemoryEntityStore>, InMemoryLogSink) {
        let store = Arc::new(InMemoryEntityStore::new());
        let sink = InMemoryLogSink::new();
        let handler =
            StartSessionHandler::new(store.clone(), Logger::new(Arc::new(sink.clone()), false));
        (handler, store, sink)
    }

    fn uid() -> UserId {
        UserId::new("alice").unwrap()
    }

    #[tokio::test]
    async fn charges_offering_price() {
        let (handler, store, sink) = setup();

        let session = handler
            .handle(StartSessionCommand {
                user_id: uid(),
                offering: Offering::ScamMasterclass,
                topic: None,
            })
            .await
            .unwrap();

        assert_eq!(session.cost_usd, 25);
        assert_eq!(session.topic, "Scam prevention masterclass");
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(store.get_user_sessions(&uid()).await.unwrap().len(), 1);

        let payments = sink.with_context(LogContext::Payment);
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].message, "Payment: session purchased");
        assert_eq!(payments[0].data.as_ref().unwrap()["amount"], 25);
        assert_eq!(payments[0].data.as_ref().unwrap()["offering"], "scam_masterclass");
    }

    #[tokio::test]
    async fn custom_topic_overrides_default() {
        let (handler, _, _) = setup();

        let session = handler
            .handle(StartSessionCommand {
                user_id: uid(),
                offering: Offering::BasicSession,
                topic: Some("Staking questions".into()),
            })
            .await
            .unwrap();

        assert_eq!(session.topic, "Staking questions");
        assert_eq!(session.cost_usd, 10);
    }
}
