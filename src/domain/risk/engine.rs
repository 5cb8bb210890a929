//! Deterministic risk scoring and recommendations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::Percentage;

/// Highest option value offered by any questionnaire question.
pub const MAX_ANSWER_VALUE: u8 = 4;

/// Safety advice given to every learner regardless of score.
pub const BASE_RECOMMENDATIONS: [&str; 5] = [
    "Never invest more than you can afford to lose",
    "Start with small amounts to learn",
    "Research before investing in any cryptocurrency",
    "Use reputable exchanges and wallets",
    "Enable two-factor authentication on all accounts",
];

const CONSERVATIVE_ADDENDUM: [&str; 4] = [
    "Consider starting with just $10-50",
    "Focus on Bitcoin and Ethereum initially",
    "Avoid day trading and complex strategies",
    "Take time to learn before increasing investments",
];

const MODERATE_ADDENDUM: [&str; 4] = [
    "Consider investing 5-10% of your portfolio",
    "Diversify across 3-5 different cryptocurrencies",
    "Learn about dollar-cost averaging",
    "Set clear profit-taking and loss limits",
];

const GROWTH_ADDENDUM: [&str; 4] = [
    "You may consider higher allocations, but be cautious",
    "Learn about advanced strategies like DeFi",
    "Consider professional advice for large amounts",
    "Stay updated on market trends and regulations",
];

/// Risk tolerance band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Score 0-25
    Conservative,
    /// Score 26-50
    Moderate,
    /// Score 51-75
    Aggressive,
    /// Score above 75
    VeryAggressive,
}

impl RiskLevel {
    /// Determine the band for a score. Upper bounds are inclusive.
    pub fn from_score(score: Percentage) -> Self {
        match score.value() {
            0..=25 => Self::Conservative,
            26..=50 => Self::Moderate,
            51..=75 => Self::Aggressive,
            _ => Self::VeryAggressive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Moderate => "Moderate",
            Self::Aggressive => "Aggressive",
            Self::VeryAggressive => "Very Aggressive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Conservative => "You prefer low-risk investments with steady returns.",
            Self::Moderate => "You can handle some risk for potentially higher returns.",
            Self::Aggressive => "You're comfortable with higher risk for growth potential.",
            Self::VeryAggressive => "You seek maximum growth despite high volatility.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of scoring one questionnaire submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskEvaluation {
    pub score: Percentage,
    pub level: RiskLevel,
    pub recommendations: Vec<String>,
}

/// Scores answers as the share of the maximum attainable total.
///
/// An empty map scores 0. Values above [`MAX_ANSWER_VALUE`] are not rejected
/// here; the result saturates at 100.
pub fn compute_score(answers: &BTreeMap<String, u8>) -> Percentage {
    let count = answers.len() as u32;
    let sum: u32 = answers.values().map(|v| u32::from(*v)).sum();
    Percentage::from_ratio(sum, count * u32::from(MAX_ANSWER_VALUE))
}

pub fn classify_level(score: Percentage) -> RiskLevel {
    RiskLevel::from_score(score)
}

/// Base recommendations followed by the addendum for the score's band.
///
/// Aggressive and Very Aggressive share one addendum.
pub fn generate_recommendations(score: Percentage) -> Vec<String> {
    let addendum = match score.value() {
        0..=25 => &CONSERVATIVE_ADDENDUM,
        26..=50 => &MODERATE_ADDENDUM,
        _ => &GROWTH_ADDENDUM,
    };

    BASE_RECOMMENDATIONS
        .iter()
        .chain(addendum.iter())
        .map(|s| s.to_string())
        .collect()
}

/// Score, band, and recommendations in one pass.
pub fn evaluate(answers: &BTreeMap<String, u8>) -> RiskEvaluation {
    let score = compute_score(answers);
    RiskEvaluation {
        score,
        level: classify_level(score),
        recommendations: generate_recommendations(score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn answers(values: &[u8]) -> BTreeMap<String, u8> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("q{}", i), *v))
            .collect()
    }

    #[test]
    fn empty_answers_score_zero() {
        assert_eq!(compute_score(&BTreeMap::new()), Percentage::ZERO);
    }

    #[test]
    fn score_is_share_of_maximum() {
        assert_eq!(compute_score(&answers(&[1, 1, 1])).value(), 25);
        assert_eq!(compute_score(&answers(&[4, 4, 4])).value(), 100);
        // 7 / 12 = 58.33
        assert_eq!(compute_score(&answers(&[2, 3, 2])).value(), 58);
        // 5 / 8 = 62.5 rounds up
        assert_eq!(compute_score(&answers(&[2, 3])).value(), 63);
    }

    #[test]
    fn classify_level_boundaries() {
        let level = |s| classify_level(Percentage::new(s));
        assert_eq!(level(0), RiskLevel::Conservative);
        assert_eq!(level(25), RiskLevel::Conservative);
        assert_eq!(level(26), RiskLevel::Moderate);
        assert_eq!(level(50), RiskLevel::Moderate);
        assert_eq!(level(51), RiskLevel::Aggressive);
        assert_eq!(level(75), RiskLevel::Aggressive);
        assert_eq!(level(76), RiskLevel::VeryAggressive);
        assert_eq!(level(100), RiskLevel::VeryAggressive);
    }

    #[test]
    fn levels_carry_labels_and_descriptions() {
        assert_eq!(RiskLevel::VeryAggressive.label(), "Very Aggressive");
        assert_eq!(
            RiskLevel::Conservative.description(),
            "You prefer low-risk investments with steady returns."
        );
    }

    #[test]
    fn recommendations_pick_band_addendum() {
        let low = generate_recommendations(Percentage::new(25));
        let mid = generate_recommendations(Percentage::new(26));
        let high = generate_recommendations(Percentage::new(51));
        let top = generate_recommendations(Percentage::new(90));

        assert_eq!(low[5], "Consider starting with just $10-50");
        assert_eq!(mid[5], "Consider investing 5-10% of your portfolio");
        assert_eq!(high[5], "You may consider higher allocations, but be cautious");
        assert_eq!(high, top);
        assert_eq!(low.len(), 9);
    }

    #[test]
    fn evaluate_combines_all_parts() {
        let eval = evaluate(&answers(&[4, 4, 3]));
        assert_eq!(eval.score.value(), 92);
        assert_eq!(eval.level, RiskLevel::VeryAggressive);
        assert_eq!(eval.recommendations.len(), 9);
    }

    proptest! {
        #[test]
        fn score_stays_in_range(values in proptest::collection::vec(1u8..=4, 0..20)) {
            let score = compute_score(&answers(&values)).value();
            prop_assert!(score <= 100);
            if !values.is_empty() {
                prop_assert!(score >= 25);
            }
        }

        #[test]
        fn recommendations_always_start_with_base(score in 0u8..=100) {
            let recs = generate_recommendations(Percentage::new(score));
            prop_assert_eq!(recs.len(), BASE_RECOMMENDATIONS.len() + 4);
            for (got, want) in recs.iter().zip(BASE_RECOMMENDATIONS.iter()) {
                prop_assert_eq!(got.as_str(), *want);
            }
        }
    }
}
