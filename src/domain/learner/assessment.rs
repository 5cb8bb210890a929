//! Stored result of a risk questionnaire.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{Percentage, Timestamp, UserId};

/// The latest risk questionnaire submission for a learner.
///
/// At most one per user; a resubmission replaces the previous record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub user_id: UserId,
    /// Question id to selected option value.
    pub answers: BTreeMap<String, u8>,
    pub score: Percentage,
    pub recommendations: Vec<String>,
    pub completed_at: Timestamp,
}
