//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{Timestamp, ValidationError};

/// Learner identifier, supplied by the caller on first interaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a guidance session.
///
/// Rendered as `session_<unix-millis>_<suffix>`. The millisecond prefix is
/// zero-padded to 13 digits so lexical order follows creation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

const SESSION_PREFIX: &str = "session_";
const SUFFIX_LEN: usize = 9;

impl SessionId {
    /// Generates a new identifier stamped with the given instant.
    pub fn generate_at(at: Timestamp) -> Self {
        let millis = at.as_datetime().timestamp_millis().max(0);
        let suffix: String = Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_string();
        Self(format!("{SESSION_PREFIX}{millis:013}_{suffix}"))
    }

    /// Generates a new identifier stamped with the current instant.
    pub fn generate() -> Self {
        Self::generate_at(Timestamp::now())
    }

    /// Parses an identifier received from a caller.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let Some(rest) = value.strip_prefix(SESSION_PREFIX) else {
            return Err(ValidationError::invalid_format(
                "session_id",
                "missing session_ prefix",
            ));
        };
        let mut parts = rest.splitn(2, '_');
        let millis = parts.next().unwrap_or_default();
        let suffix = parts.next().unwrap_or_default();
        if millis.is_empty() || !millis.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "session_id",
                "timestamp segment must be numeric",
            ));
        }
        if suffix.is_empty() {
            return Err(ValidationError::invalid_format(
                "session_id",
                "missing random suffix",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("  ").is_err());
        assert_eq!(UserId::new("sample_user_1").unwrap().as_str(), "sample_user_1");
    }

    #[test]
    fn user_id_deserialization_validates() {
        let ok: Result<UserId, _> = serde_json::from_str("\"u-1\"");
        assert!(ok.is_ok());

        let empty: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(empty.is_err());
    }

    #[test]
    fn session_id_has_expected_shape() {
        let at = Timestamp::from_unix_secs(1_705_276_800);
        let id = SessionId::generate_at(at);

        assert!(id.as_str().starts_with("session_1705276800000_"));
        assert_eq!(id.as_str().len(), "session_".len() + 13 + 1 + SUFFIX_LEN);
    }

    #[test]
    fn session_ids_order_by_creation_time() {
        let earlier = SessionId::generate_at(Timestamp::from_unix_secs(1_000));
        let later = SessionId::generate_at(Timestamp::from_unix_secs(2_000));
        assert!(earlier < later);
    }

    #[test]
    fn generated_session_ids_differ() {
        let at = Timestamp::now();
        assert_ne!(SessionId::generate_at(at), SessionId::generate_at(at));
    }

    #[test]
    fn session_id_parse_roundtrips_generated_ids() {
        let id = SessionId::generate();
        assert_eq!(SessionId::parse(id.to_string()).unwrap(), id);
    }

    #[test]
    fn session_id_parse_rejects_malformed_values() {
        assert!(SessionId::parse("abc").is_err());
        assert!(SessionId::parse("session_").is_err());
        assert!(SessionId::parse("session_12a_xyz").is_err());
        assert!(SessionId::parse("session_123").is_err());
    }
}
