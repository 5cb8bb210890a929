//! In-memory storage adapters.

mod entity_store;

pub use entity_store::{InMemoryEntityStore, SAMPLE_USER_ID};
