//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `learner` - Users, guidance sessions, risk assessments, and progress
//! - `risk` - Pure questionnaire scoring and recommendations
//! - `logging` - Structured log entries and context tags

pub mod foundation;
pub mod learner;
pub mod logging;
pub mod risk;
