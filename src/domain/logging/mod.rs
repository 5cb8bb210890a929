//! Logging vocabulary shared by the logger, its sinks, and call sites.

mod entry;

pub use entry::{LogContext, LogEntry, LogEvent, LogLevel};
