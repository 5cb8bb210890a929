//! Log sink port.
//!
//! The destination for structured log entries. Swapping the sink (console,
//! remote collector, in-memory capture) never changes logging call sites.

use crate::domain::logging::LogEntry;

/// Receives every entry the logger decides to emit.
///
/// Writes are fire-and-forget: a sink must not fail the caller.
pub trait LogSink: Send + Sync {
    fn write(&self, entry: LogEntry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_sink_is_object_safe() {
        fn _accepts_dyn(_sink: &dyn LogSink) {}
    }
}
