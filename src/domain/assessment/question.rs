//! Validated questions and their options.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FactorName;

/// Identifier of a question, unique within a bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u32);

impl QuestionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an option, unique within its question.
///
/// For multi-select questions the option id is the factor name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one option; every option carries a factor group.
    #[default]
    ForcedChoice,
    /// Pick a fixed number of factors directly.
    MultiSelect,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionKind::ForcedChoice => "forced-choice",
            QuestionKind::MultiSelect => "multi-select",
        };
        write!(f, "{}", s)
    }
}

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    id: OptionId,
    text: String,
    group: Option<FactorName>,
}

impl QuestionOption {
    pub(crate) fn new(id: OptionId, text: String, group: Option<FactorName>) -> Self {
        Self { id, text, group }
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Factor scored when this option is chosen (forced-choice only).
    pub fn group(&self) -> Option<&FactorName> {
        self.group.as_ref()
    }
}

/// A question that has passed bank validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    kind: QuestionKind,
    options: Vec<QuestionOption>,
    repeat_of: Option<QuestionId>,
}

impl Question {
    pub(crate) fn new(
        id: QuestionId,
        text: String,
        kind: QuestionKind,
        options: Vec<QuestionOption>,
        repeat_of: Option<QuestionId>,
    ) -> Self {
        Self {
            id,
            text,
            kind,
            options,
            repeat_of,
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    /// The earlier question this one duplicates, if it is a repeat.
    pub fn repeat_of(&self) -> Option<QuestionId> {
        self.repeat_of
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat_of.is_some()
    }

    /// Finds an option by id.
    pub fn option(&self, id: &OptionId) -> Option<&QuestionOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Resolves the factor group of an option.
    pub fn group_of(&self, id: &OptionId) -> Option<&FactorName> {
        self.option(id).and_then(QuestionOption::group)
    }

    /// Factor groups in option order.
    pub(crate) fn groups(&self) -> impl Iterator<Item = Option<&FactorName>> {
        self.options.iter().map(QuestionOption::group)
    }
}
