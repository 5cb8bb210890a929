//! Structured application logger.
//!
//! Every writer reduces to one [`LogEntry`] handed to the injected
//! [`LogSink`]. Debug entries are dropped outside development mode.
//!
//! # Example
//!
//! ```ignore
//! let logger = Logger::new(Arc::new(TracingLogSink::new()), true);
//!
//! logger.user_action("started onboarding", Some(&user_id), None);
//! logger.api_call("/api/chat", "POST", 200, 412, Some(&user_id));
//! ```

use serde_json::{json, Map, Value};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::foundation::{Percentage, Timestamp, UserId};
use crate::domain::logging::{LogContext, LogEntry, LogEvent, LogLevel};
use crate::ports::LogSink;

/// Shared logger, constructed once and passed to every handler.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    development: bool,
}

impl Logger {
    pub fn new(sink: Arc<dyn LogSink>, development: bool) -> Self {
        Self { sink, development }
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    fn log(&self, level: LogLevel, event: LogEvent) {
        if level == LogLevel::Debug && !self.development {
            return;
        }
        self.sink
            .write(LogEntry::from_event(level, event, Timestamp::now()));
    }

    pub fn debug(&self, event: impl Into<LogEvent>) {
        self.log(LogLevel::Debug, event.into());
    }

    pub fn info(&self, event: impl Into<LogEvent>) {
        self.log(LogLevel::Info, event.into());
    }

    pub fn warn(&self, event: impl Into<LogEvent>) {
        self.log(LogLevel::Warn, event.into());
    }

    pub fn error(&self, event: impl Into<LogEvent>) {
        self.log(LogLevel::Error, event.into());
    }

    // === Convenience writers ===

    /// `User action: <action>` at info, tagged `USER_ACTION`.
    pub fn user_action(&self, action: &str, user_id: Option<&UserId>, data: Option<Value>) {
        let mut event = LogEvent::new(format!("User action: {}", action))
            .context(LogContext::UserAction)
            .user(user_id);
        event.data = data;
        self.info(event);
    }

    /// `API Call: <METHOD> <endpoint> - <status> (<n>ms)` at info, tagged `API`.
    pub fn api_call(
        &self,
        endpoint: &str,
        method: &str,
        status_code: u16,
        duration_ms: u64,
        user_id: Option<&UserId>,
    ) {
        self.info(
            LogEvent::new(format!(
                "API Call: {} {} - {} ({}ms)",
                method, endpoint, status_code, duration_ms
            ))
            .context(LogContext::Api)
            .data(json!({
                "endpoint": endpoint,
                "method": method,
                "statusCode": status_code,
                "duration": duration_ms,
            }))
            .user(user_id),
        );
    }

    /// `Payment: <event>` at info, tagged `PAYMENT`. The amount is merged
    /// into any object payload supplied.
    pub fn payment_event(
        &self,
        event: &str,
        amount_usd: Option<u32>,
        user_id: Option<&UserId>,
        data: Option<Value>,
    ) {
        let mut payload = match data {
            Some(Value::Object(map)) => map,
            Some(other) => {
                let mut map = Map::new();
                map.insert("details".to_string(), other);
                map
            }
            None => Map::new(),
        };
        payload.insert("amount".to_string(), json!(amount_usd));

        self.info(
            LogEvent::new(format!("Payment: {}", event))
                .context(LogContext::Payment)
                .data(Value::Object(payload))
                .user(user_id),
        );
    }

    /// `Quiz completed: <quiz_id>` at info, tagged `QUIZ`, with the rounded
    /// percentage score.
    pub fn quiz_completion(
        &self,
        quiz_id: &str,
        score: u32,
        total: u32,
        user_id: Option<&UserId>,
    ) {
        let percentage = Percentage::from_ratio(score, total);
        self.info(
            LogEvent::new(format!("Quiz completed: {}", quiz_id))
                .context(LogContext::Quiz)
                .data(json!({
                    "quizId": quiz_id,
                    "score": score,
                    "total": total,
                    "percentage": percentage.value(),
                }))
                .user(user_id),
        );
    }

    /// `Scam reported: <type>` at warn, tagged `SCAM_REPORT`.
    pub fn scam_reported(&self, scam_type: &str, user_id: Option<&UserId>, details: Option<Value>) {
        let mut event = LogEvent::new(format!("Scam reported: {}", scam_type))
            .context(LogContext::ScamReport)
            .user(user_id);
        event.data = details;
        self.warn(event);
    }

    /// Awaits `operation` and logs `<name> completed` (info) or
    /// `<name> failed` (error) with the elapsed milliseconds. The outcome is
    /// returned unchanged.
    pub async fn timed<T, E, F>(&self, name: &str, context: LogContext, operation: F) -> Result<T, E>
    where
        E: Display,
        F: Future<Output = Result<T, E>>,
    {
        let start = Instant::now();
        let outcome = operation.await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            Ok(_) => self.info(
                LogEvent::new(format!("{} completed", name))
                    .context(context)
                    .data(json!({ "duration_ms": duration_ms })),
            ),
            Err(err) => self.error(
                LogEvent::new(format!("{} failed", name))
                    .context(context)
                    .data(json!({ "duration_ms": duration_ms, "error": err.to_string() })),
            ),
        }

        outcome
    }
}
