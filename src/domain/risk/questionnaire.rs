//! The fixed risk questionnaire.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::ValidationError;

use super::engine::MAX_ANSWER_VALUE;

/// One selectable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub value: u8,
    pub label: &'static str,
}

/// A single-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub options: [AnswerOption; 4],
}

const fn option(value: u8, label: &'static str) -> AnswerOption {
    AnswerOption { value, label }
}

pub const RISK_QUESTIONS: [RiskQuestion; 3] = [
    RiskQuestion {
        id: "experience",
        question: "How familiar are you with investing?",
        options: [
            option(1, "Complete beginner"),
            option(2, "Some experience with stocks/bonds"),
            option(3, "Experienced investor"),
            option(4, "Professional trader"),
        ],
    },
    RiskQuestion {
        id: "risk-tolerance",
        question: "How would you react if your investment lost 20% in a day?",
        options: [
            option(1, "Panic and sell immediately"),
            option(2, "Feel worried but hold"),
            option(3, "See it as a buying opportunity"),
            option(4, "Not be concerned at all"),
        ],
    },
    RiskQuestion {
        id: "investment-amount",
        question: "What percentage of your savings would you consider investing?",
        options: [
            option(1, "Less than 5%"),
            option(2, "5-10%"),
            option(3, "10-25%"),
            option(4, "More than 25%"),
        ],
    },
];

/// Rejects any answer outside `1..=MAX_ANSWER_VALUE`.
///
/// Question ids are not checked against [`RISK_QUESTIONS`].
pub fn validate_answers(answers: &BTreeMap<String, u8>) -> Result<(), ValidationError> {
    for (question_id, value) in answers {
        if question_id.trim().is_empty() {
            return Err(ValidationError::empty_field("question id"));
        }
        if !(1..=MAX_ANSWER_VALUE).contains(value) {
            return Err(ValidationError::out_of_range(
                question_id.clone(),
                1,
                i32::from(MAX_ANSWER_VALUE),
                i32::from(*value),
            ));
        }
    }
    Ok(())
}

/// True when every questionnaire question has an answer.
pub fn is_complete(answers: &BTreeMap<String, u8>) -> bool {
    RISK_QUESTIONS.iter().all(|q| answers.contains_key(q.id))
}
