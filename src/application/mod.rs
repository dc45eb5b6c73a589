//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! It is the inbound interface a transport layer calls into.

pub mod handlers;

pub use handlers::{
    AbandonAssessmentCommand, AbandonAssessmentHandler, RecordAnswerCommand, RecordAnswerHandler,
    RecordAnswerResult, StartAssessmentCommand, StartAssessmentHandler, StartAssessmentResult,
    SubmitAssessmentCommand, SubmitAssessmentHandler, SubmitAssessmentResult,
};
