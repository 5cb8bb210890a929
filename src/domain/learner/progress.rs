//! Learning progress through the educational modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{Timestamp, UserId};

/// Badge awarded when a learner completes their first module.
pub const FIRST_MODULE_BADGE: &str = "first_module_completed";

/// Per-learner progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: UserId,
    pub completed_modules: BTreeSet<String>,
    pub current_module: Option<String>,
    /// Cumulative minutes spent learning.
    pub total_time_spent: u32,
    pub achievement_badges: BTreeSet<String>,
    pub last_activity: Timestamp,
}

/// Partial update for [`UserProgress`]. `None` leaves the field untouched.
///
/// Set-valued fields replace the stored set wholesale, so callers that want
/// to add an element must read, extend, and write back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressPatch {
    pub completed_modules: Option<BTreeSet<String>>,
    pub current_module: Option<String>,
    pub total_time_spent: Option<u32>,
    pub achievement_badges: Option<BTreeSet<String>>,
}

impl UserProgress {
    /// The record a learner starts with before any activity.
    pub fn empty(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            completed_modules: BTreeSet::new(),
            current_module: None,
            total_time_spent: 0,
            achievement_badges: BTreeSet::new(),
            last_activity: now,
        }
    }

    /// Merges `patch` over this record and refreshes `last_activity`.
    pub fn apply(&self, patch: ProgressPatch, now: Timestamp) -> UserProgress {
        UserProgress {
            user_id: self.user_id.clone(),
            completed_modules: patch
                .completed_modules
                .unwrap_or_else(|| self.completed_modules.clone()),
            current_module: patch.current_module.or_else(|| self.current_module.clone()),
            total_time_spent: patch.total_time_spent.unwrap_or(self.total_time_spent),
            achievement_badges: patch
                .achievement_badges
                .unwrap_or_else(|| self.achievement_badges.clone()),
            last_activity: now,
        }
    }

    /// Builds the patch recording completion of `module_id`.
    ///
    /// Time accumulates even when the module was already completed; the first
    /// completion ever also earns [`FIRST_MODULE_BADGE`].
    pub fn module_completion(&self, module_id: &str, minutes: u32) -> ProgressPatch {
        let mut modules = self.completed_modules.clone();
        modules.insert(module_id.to_string());

        let mut badges = self.achievement_badges.clone();
        if self.completed_modules.is_empty() {
            badges.insert(FIRST_MODULE_BADGE.to_string());
        }

        ProgressPatch {
            completed_modules: Some(modules),
            current_module: None,
            total_time_spent: Some(self.total_time_spent.saturating_add(minutes)),
            achievement_badges: Some(badges),
        }
    }
}
