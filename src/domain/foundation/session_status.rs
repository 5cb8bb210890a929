//! SessionStatus enum for tracking lifecycle of guidance sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a guidance session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Returns true if the session can still be modified.
    pub fn is_mutable(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Active, Completed) | (Active, Cancelled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Active => vec![Completed, Cancelled],
            Completed | Cancelled => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(SessionStatus::default(), SessionStatus::Active);
    }

    #[test]
    fn only_active_is_mutable() {
        assert!(SessionStatus::Active.is_mutable());
        assert!(!SessionStatus::Completed.is_mutable());
        assert!(!SessionStatus::Cancelled.is_mutable());
    }

    #[test]
    fn active_can_finish_either_way() {
        assert!(SessionStatus::Active.can_transition_to(&SessionStatus::Completed));
        assert!(SessionStatus::Active.can_transition_to(&SessionStatus::Cancelled));
    }

    #[test]
    fn terminal_states_are_frozen() {
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::Cancelled.is_terminal());
        assert!(SessionStatus::Completed
            .transition_to(SessionStatus::Active)
            .is_err());
        assert!(SessionStatus::Cancelled
            .transition_to(SessionStatus::Completed)
            .is_err());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&SessionStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
