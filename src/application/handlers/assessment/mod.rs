//! Assessment command handlers.
//!
//! Start → Record (per answer) → Submit, or Abandon at any point.

mod abandon_assessment;
mod record_answer;
mod start_assessment;
mod submit_assessment;

pub use abandon_assessment::{AbandonAssessmentCommand, AbandonAssessmentHandler};
pub use record_answer::{RecordAnswerCommand, RecordAnswerHandler, RecordAnswerResult};
pub use start_assessment::{StartAssessmentCommand, StartAssessmentHandler, StartAssessmentResult};
pub use submit_assessment::{
    SubmitAssessmentCommand, SubmitAssessmentHandler, SubmitAssessmentResult,
};
