//! Structured log records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Fixed context tags used by the convenience log writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogContext {
    UserAction,
    Api,
    Payment,
    Quiz,
    ScamReport,
    /// Calls to the completion provider.
    Provider,
    Store,
}

impl LogContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogContext::UserAction => "USER_ACTION",
            LogContext::Api => "API",
            LogContext::Payment => "PAYMENT",
            LogContext::Quiz => "QUIZ",
            LogContext::ScamReport => "SCAM_REPORT",
            LogContext::Provider => "PROVIDER",
            LogContext::Store => "STORE",
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a call site wants logged. The logger adds level and timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogEvent {
    pub message: String,
    pub context: Option<LogContext>,
    pub data: Option<Value>,
    pub user_id: Option<UserId>,
}

impl LogEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn user(mut self, user_id: Option<&UserId>) -> Self {
        self.user_id = user_id.cloned();
        self
    }
}

impl From<&str> for LogEvent {
    fn from(message: &str) -> Self {
        LogEvent::new(message)
    }
}

impl From<String> for LogEvent {
    fn from(message: String) -> Self {
        LogEvent::new(message)
    }
}

/// A write-only record handed to a log sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: Timestamp,
    pub level: LogLevel,
    pub message: String,
    pub context: Option<LogContext>,
    pub data: Option<Value>,
    pub user_id: Option<UserId>,
}

impl LogEntry {
    pub fn from_event(level: LogLevel, event: LogEvent, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            level,
            message: event.message,
            context: event.context,
            data: event.data,
            user_id: event.user_id,
        }
    }

    /// Single-line human rendering: `<ts> LEVEL [CONTEXT] message`.
    pub fn render(&self) -> String {
        let context = self
            .context
            .map(|c| format!("[{}] ", c))
            .unwrap_or_default();
        format!(
            "{} {} {}{}",
            self.timestamp.as_datetime().to_rfc3339(),
            self.level,
            context,
            self.message
        )
    }
}
