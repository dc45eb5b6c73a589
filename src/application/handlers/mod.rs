//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    AbandonAssessmentCommand, AbandonAssessmentHandler, RecordAnswerCommand, RecordAnswerHandler,
    RecordAnswerResult, StartAssessmentCommand, StartAssessmentHandler, StartAssessmentResult,
    SubmitAssessmentCommand, SubmitAssessmentHandler, SubmitAssessmentResult,
};
