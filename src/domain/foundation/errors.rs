//! Error types for the domain layer.

use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    MalformedBank,
    UnknownQuestion,
    UnknownOption,
    WrongSelectionCount,
    AnswerKindMismatch,

    // State errors
    IncompleteSubmission,
    AlreadySealed,
    NotSealed,

    // Not found errors
    SessionNotFound,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MalformedBank => "MALFORMED_BANK",
            ErrorCode::UnknownQuestion => "UNKNOWN_QUESTION",
            ErrorCode::UnknownOption => "UNKNOWN_OPTION",
            ErrorCode::WrongSelectionCount => "WRONG_SELECTION_COUNT",
            ErrorCode::AnswerKindMismatch => "ANSWER_KIND_MISMATCH",
            ErrorCode::IncompleteSubmission => "INCOMPLETE_SUBMISSION",
            ErrorCode::AlreadySealed => "ALREADY_SEALED",
            ErrorCode::NotSealed => "NOT_SEALED",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
///
/// Ports and adapters report infrastructure failures with this type.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::new(ErrorCode::InternalError, format!("Serialization failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("factor");
        assert_eq!(format!("{}", err), "Field 'factor' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("question_id", 1, 40, 41);
        assert_eq!(
            format!("{}", err),
            "Field 'question_id' must be between 1 and 40, got 41"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::SessionNotFound, "Session not found");
        assert_eq!(format!("{}", err), "[SESSION_NOT_FOUND] Session not found");
    }

    #[test]
    fn error_codes_display_in_screaming_snake_case() {
        assert_eq!(ErrorCode::WrongSelectionCount.to_string(), "WRONG_SELECTION_COUNT");
        assert_eq!(ErrorCode::IncompleteSubmission.to_string(), "INCOMPLETE_SUBMISSION");
        assert_eq!(ErrorCode::AlreadySealed.to_string(), "ALREADY_SEALED");
    }
}
