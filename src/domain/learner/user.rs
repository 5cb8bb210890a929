//! Learner account state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{Percentage, Timestamp, UserId};

/// A learner known to the guidance service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    /// Reference into an external identity system (e.g. a social login).
    pub external_id: Option<String>,
    pub onboarding_progress: Percentage,
    pub risk_tolerance_score: Option<Percentage>,
    pub purchased_features: BTreeSet<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Caller-supplied fields for a new user. Timestamps are stamped by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: UserId,
    pub external_id: Option<String>,
    pub onboarding_progress: Percentage,
    pub risk_tolerance_score: Option<Percentage>,
    pub purchased_features: BTreeSet<String>,
}

impl NewUser {
    /// A fresh learner with no progress and no purchases.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            external_id: None,
            onboarding_progress: Percentage::ZERO,
            risk_tolerance_score: None,
            purchased_features: BTreeSet::new(),
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn with_onboarding_progress(mut self, progress: Percentage) -> Self {
        self.onboarding_progress = progress;
        self
    }

    pub fn with_risk_tolerance_score(mut self, score: Percentage) -> Self {
        self.risk_tolerance_score = Some(score);
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.purchased_features.insert(feature.into());
        self
    }

    /// Materializes the user with both timestamps set to `now`.
    pub fn into_user(self, now: Timestamp) -> User {
        User {
            user_id: self.user_id,
            external_id: self.external_id,
            onboarding_progress: self.onboarding_progress,
            risk_tolerance_score: self.risk_tolerance_score,
            purchased_features: self.purchased_features,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a [`User`]. `None` leaves the field untouched.
///
/// Set-valued fields replace the stored set wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub external_id: Option<String>,
    pub onboarding_progress: Option<Percentage>,
    pub risk_tolerance_score: Option<Percentage>,
    pub purchased_features: Option<BTreeSet<String>>,
}

impl UserPatch {
    pub fn risk_tolerance_score(score: Percentage) -> Self {
        Self {
            risk_tolerance_score: Some(score),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl User {
    /// Merges `patch` over this user and refreshes `updated_at`.
    ///
    /// `user_id` and `created_at` never change.
    pub fn apply(&self, patch: UserPatch, now: Timestamp) -> User {
        User {
            user_id: self.user_id.clone(),
            external_id: patch.external_id.or_else(|| self.external_id.clone()),
            onboarding_progress: patch
                .onboarding_progress
                .unwrap_or(self.onboarding_progress),
            risk_tolerance_score: patch.risk_tolerance_score.or(self.risk_tolerance_score),
            purchased_features: patch
                .purchased_features
                .unwrap_or_else(|| self.purchased_features.clone()),
            created_at: self.created_at,
            updated_at: now,
        }
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.purchased_features.contains(feature)
    }
}
