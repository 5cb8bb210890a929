//! Failures reported by entity repositories.
//!
//! A missing key is not an error: lookups and updates return `Ok(None)`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Create semantics were used with a key that already exists.
    #[error("{entity} with key '{key}' already exists")]
    DuplicateKey { entity: &'static str, key: String },

    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn duplicate(entity: &'static str, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            entity,
            key: key.into(),
        }
    }

    /// True for conflicts on a uniquely keyed entity.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_displays_entity_and_key() {
        let err = StoreError::duplicate("user", "u-1");
        assert_eq!(err.to_string(), "user with key 'u-1' already exists");
        assert!(err.is_conflict());
        assert!(!StoreError::Unavailable("x".into()).is_conflict());
    }
}
