//! Console sink backed by `tracing`.
//!
//! Every entry becomes a `tracing` event at the matching level, so output
//! format and filtering follow whatever subscriber the binary installs.

use crate::domain::logging::{LogEntry, LogLevel};
use crate::ports::LogSink;

/// Forwards log entries to the global `tracing` dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl TracingLogSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn write(&self, entry: LogEntry) {
        let context = entry.context.map(|c| c.as_str()).unwrap_or("-");
        let user_id = entry.user_id.as_ref().map(|u| u.as_str()).unwrap_or("-");
        let data = entry
            .data
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        let message = entry.message.as_str();

        match entry.level {
            LogLevel::Debug => tracing::debug!(context, user_id, data = %data, "{}", message),
            LogLevel::Info => tracing::info!(context, user_id, data = %data, "{}", message),
            LogLevel::Warn => tracing::warn!(context, user_id, data = %data, "{}", message),
            LogLevel::Error => tracing::error!(context, user_id, data = %data, "{}", message),
        }
    }
}
