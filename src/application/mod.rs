//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers return a tagged [`Failure`]; the HTTP boundary classifies it
//! once with [`classify`].

pub mod error_classifier;
pub mod handlers;
mod logger;

pub use error_classifier::{classify, AppError, ClassifiedError, ErrorKind, Failure};
pub use logger::Logger;
