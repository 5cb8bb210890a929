//! Capturing sink for tests.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::logging::{LogContext, LogEntry, LogLevel};
use crate::ports::LogSink;

/// Records every entry in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogSink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl InMemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All captured entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer().clone()
    }

    /// Entries carrying the given context tag.
    pub fn with_context(&self, context: LogContext) -> Vec<LogEntry> {
        self.buffer()
            .iter()
            .filter(|e| e.context == Some(context))
            .cloned()
            .collect()
    }

    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.buffer()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// True if any entry's message equals `message`.
    pub fn contains_message(&self, message: &str) -> bool {
        self.buffer().iter().any(|e| e.message == message)
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }
}

impl LogSink for InMemoryLogSink {
    fn write(&self, entry: LogEntry) {
        self.buffer().push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::logging::LogEvent;

    fn entry(level: LogLevel, message: &str, context: LogContext) -> LogEntry {
        LogEntry::from_event(
            level,
            LogEvent::new(message).context(context),
            Timestamp::now(),
        )
    }

    #[test]
    fn captures_entries_in_order() {
        let sink = InMemoryLogSink::new();
        sink.write(entry(LogLevel::Info, "first", LogContext::Api));
        sink.write(entry(LogLevel::Warn, "second", LogContext::ScamReport));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
    }

    #[test]
    fn filters_by_context_and_level() {
        let sink = InMemoryLogSink::new();
        sink.write(entry(LogLevel::Info, "a", LogContext::Api));
        sink.write(entry(LogLevel::Info, "b", LogContext::Quiz));
        sink.write(entry(LogLevel::Error, "c", LogContext::Api));

        assert_eq!(sink.with_context(LogContext::Api).len(), 2);
        assert_eq!(sink.at_level(LogLevel::Info).len(), 2);
        assert!(sink.contains_message("b"));
        assert!(!sink.contains_message("z"));
    }

    #[test]
    fn clones_share_the_buffer() {
        let sink = InMemoryLogSink::new();
        let clone = sink.clone();
        clone.write(entry(LogLevel::Debug, "x", LogContext::Store));

        assert_eq!(sink.len(), 1);
        sink.clear();
        assert!(clone.is_empty());
    }
}
