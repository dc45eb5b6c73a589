//! Assessment-specific error types.
//!
//! Every variant is a caller-correctable input error except `MalformedBank`,
//! which is fatal for the hosting process, and `Infrastructure`.
//!
//! # Transport Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MalformedBank | 500 |
//! | UnknownQuestion | 400 |
//! | UnknownOption | 400 |
//! | WrongSelectionCount | 422 |
//! | AnswerKindMismatch | 400 |
//! | IncompleteSubmission | 422 |
//! | AlreadySealed | 409 |
//! | NotSealed | 409 |
//! | SessionNotFound | 404 |
//! | Infrastructure | 500 |

use thiserror::Error;

use super::{FactorName, OptionId, QuestionId, QuestionKind};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

/// Errors raised by the scoring engine and the assessment handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("Malformed question bank: {0}")]
    MalformedBank(#[from] BankDefect),

    #[error("Question {0} does not exist")]
    UnknownQuestion(QuestionId),

    #[error("Option '{option_id}' does not exist on question {question_id}")]
    UnknownOption {
        question_id: QuestionId,
        option_id: OptionId,
    },

    #[error("Question {question_id} requires exactly {expected} selections, got {actual}")]
    WrongSelectionCount {
        question_id: QuestionId,
        expected: usize,
        actual: usize,
    },

    #[error("Question {question_id} expects a {expected} answer")]
    AnswerKindMismatch {
        question_id: QuestionId,
        expected: QuestionKind,
    },

    #[error("Submission is incomplete, missing answers for questions: {}", join_ids(.missing))]
    IncompleteSubmission { missing: Vec<QuestionId> },

    #[error("Responses are sealed and can no longer change")]
    AlreadySealed,

    #[error("Responses must be sealed before scoring")]
    NotSealed,

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl AssessmentError {
    /// Returns the stable error code for transport layers.
    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::MalformedBank(_) => ErrorCode::MalformedBank,
            AssessmentError::UnknownQuestion(_) => ErrorCode::UnknownQuestion,
            AssessmentError::UnknownOption { .. } => ErrorCode::UnknownOption,
            AssessmentError::WrongSelectionCount { .. } => ErrorCode::WrongSelectionCount,
            AssessmentError::AnswerKindMismatch { .. } => ErrorCode::AnswerKindMismatch,
            AssessmentError::IncompleteSubmission { .. } => ErrorCode::IncompleteSubmission,
            AssessmentError::AlreadySealed => ErrorCode::AlreadySealed,
            AssessmentError::NotSealed => ErrorCode::NotSealed,
            AssessmentError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            AssessmentError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for AssessmentError {
    fn from(err: DomainError) -> Self {
        AssessmentError::Infrastructure(err.to_string())
    }
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The specific invariant a question bank violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankDefect {
    #[error("bank definition could not be read: {0}")]
    Unreadable(String),

    #[error("factor catalog is empty")]
    EmptyCatalog,

    #[error("factor name cannot be empty")]
    BlankFactor,

    #[error("factor '{0}' is listed more than once")]
    DuplicateFactor(FactorName),

    #[error("bank contains no questions")]
    EmptyBank,

    #[error("question at position {position} has id {found}, expected {expected}")]
    NonSequentialId {
        position: usize,
        expected: QuestionId,
        found: QuestionId,
    },

    #[error("question {question_id} has {count} options")]
    TooFewOptions { question_id: QuestionId, count: usize },

    #[error("question {question_id} repeats option id '{option_id}'")]
    DuplicateOption {
        question_id: QuestionId,
        option_id: OptionId,
    },

    #[error("option '{option_id}' on question {question_id} has no group")]
    MissingGroup {
        question_id: QuestionId,
        option_id: OptionId,
    },

    #[error("option '{option_id}' on question {question_id} uses unknown group '{group}'")]
    UnknownGroup {
        question_id: QuestionId,
        option_id: OptionId,
        group: String,
    },

    #[error("question {question_id} cannot repeat question {target}: {reason}")]
    InvalidRepeatTarget {
        question_id: QuestionId,
        target: QuestionId,
        reason: &'static str,
    },

    #[error("question {question_id} does not match the groups of question {original} at position {position}")]
    RepeatMismatch {
        question_id: QuestionId,
        original: QuestionId,
        position: usize,
    },

    #[error("bank must contain exactly one multi-select question, found {0}")]
    SelectionQuestionCount(usize),

    #[error("multi-select option '{option_id}' on question {question_id} is not a catalog factor")]
    UnknownSelectionFactor {
        question_id: QuestionId,
        option_id: OptionId,
    },

    #[error("{required} selections required but the multi-select question offers {available}")]
    SelectionExceedsOptions { required: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_submission_lists_missing_ids() {
        let err = AssessmentError::IncompleteSubmission {
            missing: vec![QuestionId::new(15), QuestionId::new(40)],
        };
        assert_eq!(
            err.to_string(),
            "Submission is incomplete, missing answers for questions: 15, 40"
        );
    }

    #[test]
    fn malformed_bank_wraps_defect() {
        let err: AssessmentError = BankDefect::EmptyBank.into();
        assert_eq!(err.code(), ErrorCode::MalformedBank);
        assert_eq!(err.to_string(), "Malformed question bank: bank contains no questions");
    }

    #[test]
    fn wrong_selection_count_displays_counts() {
        let err = AssessmentError::WrongSelectionCount {
            question_id: QuestionId::new(40),
            expected: 5,
            actual: 4,
        };
        assert_eq!(err.code(), ErrorCode::WrongSelectionCount);
        assert_eq!(
            err.to_string(),
            "Question 40 requires exactly 5 selections, got 4"
        );
    }

    #[test]
    fn infrastructure_errors_convert_from_domain_error() {
        let err: AssessmentError =
            DomainError::new(ErrorCode::InternalError, "disk full").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.to_string().contains("disk full"));
    }
}
