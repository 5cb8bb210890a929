//! SubmitChatMessageHandler - Answers one learner question through the
//! completion provider.
//!
//! The request moves through [`AdviceStage`]s. Validation must succeed before
//! the provider is reached, and the request is logged once on the way out
//! whatever the outcome.

use serde_json::json;
use std::sync::Arc;
use std::time::Instant;

use crate::application::error_classifier::{classify, Failure};
use crate::application::Logger;
use crate::domain::foundation::{validate_required, StateMachine, UserId};
use crate::domain::logging::{LogContext, LogEvent};
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Endpoint name used in request logs.
pub const CHAT_ENDPOINT: &str = "/api/chat";

/// Context used when the caller supplies none.
pub const DEFAULT_CONTEXT: &str = "General crypto education";

/// Returned when the provider answers with no text.
pub const FALLBACK_RESPONSE: &str =
    "I'm here to help you learn about crypto! Could you ask me something specific?";

/// Builds the assistant's standing instructions for the given context.
pub fn system_prompt(context: &str) -> String {
    format!(
        "You are CryptoStart Buddy, a friendly and knowledgeable crypto education assistant. \
Your goal is to help complete beginners understand cryptocurrency in simple, jargon-free terms.

Key principles:
- Use everyday analogies and simple language
- Always emphasize security and scam prevention
- Encourage responsible investing (\"only invest what you can afford to lose\")
- Be encouraging but realistic about risks
- Provide actionable, step-by-step guidance
- If asked about specific investments, always recommend doing research and starting small

Context: {}

Keep responses concise but helpful, and always maintain a friendly, supportive tone.",
        context
    )
}

/// Stages of a single advice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceStage {
    Received,
    Validated,
    AwaitingProvider,
    Succeeded,
    Failed,
}

impl StateMachine for AdviceStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AdviceStage::*;
        matches!(
            (self, target),
            (Received, Validated)
                | (Received, Failed)
                | (Validated, AwaitingProvider)
                | (Validated, Failed)
                | (AwaitingProvider, Succeeded)
                | (AwaitingProvider, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AdviceStage::*;
        match self {
            Received => vec![Validated, Failed],
            Validated => vec![AwaitingProvider, Failed],
            AwaitingProvider => vec![Succeeded, Failed],
            Succeeded | Failed => vec![],
        }
    }
}

/// Completion parameters applied to every request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdviceSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// Command carrying one learner question.
#[derive(Debug, Clone, Default)]
pub struct SubmitChatMessageCommand {
    pub message: Option<String>,
    pub context: Option<String>,
    pub user_id: Option<UserId>,
}

impl SubmitChatMessageCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Result of a successful advice request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitChatMessageResult {
    pub response: String,
    /// True when the provider returned no text.
    pub used_fallback: bool,
}

/// Handler for learner chat messages.
pub struct SubmitChatMessageHandler {
    provider: Arc<dyn AIProvider>,
    logger: Logger,
    settings: AdviceSettings,
}

impl SubmitChatMessageHandler {
    pub fn new(provider: Arc<dyn AIProvider>, logger: Logger) -> Self {
        Self {
            provider,
            logger,
            settings: AdviceSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: AdviceSettings) -> Self {
        self.settings = settings;
        self
    }

    pub async fn handle(
        &self,
        cmd: SubmitChatMessageCommand,
    ) -> Result<SubmitChatMessageResult, Failure> {
        let start = Instant::now();
        let user_id = cmd.user_id.clone();
        let mut stage = AdviceStage::Received;

        let outcome = self.run(&mut stage, cmd).await;

        let status = match &outcome {
            Ok(_) => 200,
            Err(failure) => {
                if stage.can_transition_to(&AdviceStage::Failed) {
                    stage = AdviceStage::Failed;
                }
                let classified = classify(failure);
                self.logger.error(
                    LogEvent::new("Chat API error")
                        .context(LogContext::Api)
                        .data(json!({
                            "error": failure.to_string(),
                            "status": classified.status.as_u16(),
                        }))
                        .user(user_id.as_ref()),
                );
                classified.status.as_u16()
            }
        };

        tracing::debug!(stage = ?stage, status, "Advice request finished");
        self.logger.api_call(
            CHAT_ENDPOINT,
            "POST",
            status,
            start.elapsed().as_millis() as u64,
            user_id.as_ref(),
        );

        outcome
    }

    async fn run(
        &self,
        stage: &mut AdviceStage,
        cmd: SubmitChatMessageCommand,
    ) -> Result<SubmitChatMessageResult, Failure> {
        // 1. Validate
        let message = validate_required(cmd.message.as_deref(), "Message")?.to_string();
        advance(stage, AdviceStage::Validated)?;

        // 2. Build request
        let context = cmd
            .context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CONTEXT);

        let request = CompletionRequest::new(RequestMetadata::new(
            cmd.user_id.clone(),
            uuid::Uuid::new_v4().to_string(),
        ))
        .with_system_prompt(system_prompt(context))
        .with_message(MessageRole::User, message)
        .with_max_tokens(self.settings.max_tokens)
        .with_temperature(self.settings.temperature);

        // 3. Call provider
        advance(stage, AdviceStage::AwaitingProvider)?;
        let completion = self
            .logger
            .timed(
                "Chat completion",
                LogContext::Provider,
                self.provider.complete(request),
            )
            .await?;
        advance(stage, AdviceStage::Succeeded)?;

        // 4. Shape response
        if completion.is_blank() {
            return Ok(SubmitChatMessageResult {
                response: FALLBACK_RESPONSE.to_string(),
                used_fallback: true,
            });
        }

        Ok(SubmitChatMessageResult {
            response: completion.content,
            used_fallback: false,
        })
    }
}

fn advance(stage: &mut AdviceStage, target: AdviceStage) -> Result<(), Failure> {
    *stage = stage
        .transition_to(target)
        .map_err(|e| Failure::internal(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::logging::InMemoryLogSink;
    use crate::application::error_classifier::{ErrorKind, RATE_LIMITED_MESSAGE};
    use crate::domain::logging::LogLevel;
    use http::StatusCode;

    struct Harness {
        handler: SubmitChatMessageHandler,
        provider: MockAIProvider,
        sink: InMemoryLogSink,
    }

    fn harness(provider: MockAIProvider) -> Harness {
        let sink = InMemoryLogSink::new();
        let logger = Logger::new(Arc::new(sink.clone()), false);
        let handler = SubmitChatMessageHandler::new(Arc::new(provider.clone()), logger);
        Harness {
            handler,
            provider,
            sink,
        }
    }

    fn provider_logs(sink: &InMemoryLogSink) -> usize {
        sink.with_context(LogContext::Provider).len()
    }

    #[test]
    fn stage_table_requires_validation_before_provider() {
        assert!(!AdviceStage::Received.can_transition_to(&AdviceStage::AwaitingProvider));
        assert!(AdviceStage::Received.can_transition_to(&AdviceStage::Validated));
        assert!(AdviceStage::Validated.can_transition_to(&AdviceStage::AwaitingProvider));
        assert!(AdviceStage::Succeeded.is_terminal());
        assert!(AdviceStage::Failed.is_terminal());
    }

    #[test]
    fn system_prompt_embeds_context() {
        let prompt = system_prompt("Wallet setup");
        assert!(prompt.starts_with("You are CryptoStart Buddy"));
        assert!(prompt.contains("Context: Wallet setup"));
    }

    #[tokio::test]
    async fn answers_with_provider_text() {
        let h = harness(MockAIProvider::new().with_response("A wallet stores your keys."));

        let result = h
            .handler
            .handle(SubmitChatMessageCommand::new("What is a wallet?"))
            .await
            .unwrap();

        assert_eq!(result.response, "A wallet stores your keys.");
        assert!(!result.used_fallback);
    }

    #[tokio::test]
    async fn sends_bounded_parameters_and_default_context() {
        let h = harness(MockAIProvider::new().with_response("ok"));

        h.handler
            .handle(SubmitChatMessageCommand::new("What is a wallet?"))
            .await
            .unwrap();

        let call = &h.provider.get_calls()[0];
        assert_eq!(call.max_tokens, Some(500));
        assert_eq!(call.temperature, Some(0.7));
        assert_eq!(call.last_user_message(), Some("What is a wallet?"));
        let prompt = call.system_prompt.as_deref().unwrap();
        assert!(prompt.contains("Context: General crypto education"));
    }

    #[tokio::test]
    async fn passes_caller_context_and_user() {
        let h = harness(MockAIProvider::new().with_response("ok"));
        let user = UserId::new("u-1").unwrap();

        h.handler
            .handle(
                SubmitChatMessageCommand::new("How do I spot scams?")
                    .with_context("Scam prevention module")
                    .with_user(user.clone()),
            )
            .await
            .unwrap();

        let call = &h.provider.get_calls()[0];
        assert!(call
            .system_prompt
            .as_deref()
            .unwrap()
            .contains("Context: Scam prevention module"));
        assert_eq!(call.metadata.user_id, Some(user.clone()));

        let api = h.sink.with_context(LogContext::Api);
        assert_eq!(api.last().unwrap().user_id, Some(user));
    }

    #[tokio::test]
    async fn empty_message_fails_before_provider() {
        let h = harness(MockAIProvider::new());

        let failure = h
            .handler
            .handle(SubmitChatMessageCommand::new(""))
            .await
            .unwrap_err();

        let classified = classify(&failure);
        assert_eq!(classified.kind, ErrorKind::Validation);
        assert_eq!(classified.message, "Message is required");
        assert_eq!(h.provider.call_count(), 0);
        assert_eq!(provider_logs(&h.sink), 0);
    }

    #[tokio::test]
    async fn whitespace_and_missing_messages_are_rejected() {
        let h = harness(MockAIProvider::new());

        for cmd in [
            SubmitChatMessageCommand::new("   "),
            SubmitChatMessageCommand::default(),
        ] {
            let failure = h.handler.handle(cmd).await.unwrap_err();
            assert_eq!(classify(&failure).status, StatusCode::BAD_REQUEST);
        }
        assert_eq!(h.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_completion_uses_fallback() {
        let h = harness(MockAIProvider::new().with_response(""));

        let result = h
            .handler
            .handle(SubmitChatMessageCommand::new("What is a wallet?"))
            .await
            .unwrap();

        assert_eq!(result.response, FALLBACK_RESPONSE);
        assert!(result.used_fallback);
    }

    #[tokio::test]
    async fn rate_limit_is_classified_and_logged() {
        let h = harness(MockAIProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 30,
        }));

        let failure = h
            .handler
            .handle(SubmitChatMessageCommand::new("What is a wallet?"))
            .await
            .unwrap_err();

        let classified = classify(&failure);
        assert_eq!(classified.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(classified.message, RATE_LIMITED_MESSAGE);
        assert!(h.sink.contains_message("Chat completion failed"));
        assert!(h
            .sink
            .with_context(LogContext::Api)
            .iter()
            .any(|e| e.message.starts_with("API Call: POST /api/chat - 429 (")));
        assert_eq!(h.provider.call_count(), 1);
    }

    #[tokio::test]
    async fn every_request_logs_one_api_call() {
        let h = harness(
            MockAIProvider::new()
                .with_response("fine")
                .with_error(MockError::AuthenticationFailed),
        );

        h.handler
            .handle(SubmitChatMessageCommand::new("one"))
            .await
            .unwrap();
        h.handler
            .handle(SubmitChatMessageCommand::new("two"))
            .await
            .unwrap_err();
        h.handler
            .handle(SubmitChatMessageCommand::new(""))
            .await
            .unwrap_err();

        let api_calls: Vec<_> = h
            .sink
            .with_context(LogContext::Api)
            .into_iter()
            .filter(|e| e.message.starts_with("API Call:"))
            .collect();
        assert_eq!(api_calls.len(), 3);
        assert_eq!(api_calls[0].data.as_ref().unwrap()["statusCode"], 200);
        assert_eq!(api_calls[1].data.as_ref().unwrap()["statusCode"], 401);
        assert_eq!(api_calls[2].data.as_ref().unwrap()["statusCode"], 400);
        assert_eq!(h.sink.at_level(LogLevel::Error).len(), 3);
    }

    #[tokio::test]
    async fn provider_outage_hides_detail() {
        let h = harness(MockAIProvider::new().with_error(MockError::Unavailable {
            message: "OpenAI API key not configured".into(),
        }));

        let failure = h
            .handler
            .handle(SubmitChatMessageCommand::new("hi"))
            .await
            .unwrap_err();

        let classified = classify(&failure);
        assert_eq!(classified.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!classified.message.contains("API key"));
    }
}
