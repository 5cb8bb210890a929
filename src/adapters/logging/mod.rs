//! Log sink adapters.
//!
//! - `TracingLogSink` - Console output through `tracing`
//! - `InMemoryLogSink` - Captures entries for assertions

mod memory_sink;
mod tracing_sink;

pub use memory_sink::InMemoryLogSink;
pub use tracing_sink::TracingLogSink;
