//! Answers submitted by a test-taker.

use serde::{Deserialize, Serialize};

use super::{OptionId, QuestionId};

/// The option(s) chosen for one question.
///
/// Serialized untagged: a string for a single choice, an array for a
/// multi-select answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerChoice {
    Single(OptionId),
    Multiple(Vec<OptionId>),
}

/// An answer to a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub choice: AnswerChoice,
}

impl Answer {
    /// Answer for a forced-choice question.
    pub fn single(question_id: u32, option_id: impl Into<String>) -> Self {
        Self {
            question_id: QuestionId::new(question_id),
            choice: AnswerChoice::Single(OptionId::new(option_id)),
        }
    }

    /// Answer for a multi-select question.
    pub fn multiple<I, S>(question_id: u32, option_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: QuestionId::new(question_id),
            choice: AnswerChoice::Multiple(option_ids.into_iter().map(OptionId::new).collect()),
        }
    }

    /// The chosen option of a single-choice answer.
    pub fn selected_option(&self) -> Option<&OptionId> {
        match &self.choice {
            AnswerChoice::Single(id) => Some(id),
            AnswerChoice::Multiple(_) => None,
        }
    }

    /// The chosen options of a multi-select answer.
    pub fn selections(&self) -> Option<&[OptionId]> {
        match &self.choice {
            AnswerChoice::Single(_) => None,
            AnswerChoice::Multiple(ids) => Some(ids),
        }
    }
}
