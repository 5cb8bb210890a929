//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to the outside world:
//! - `ai` - Completion providers (OpenAI-compatible HTTP, mock)
//! - `http` - axum REST endpoints
//! - `logging` - Log sinks (tracing, in-memory)
//! - `memory` - In-process entity store

pub mod ai;
pub mod http;
pub mod logging;
pub mod memory;
