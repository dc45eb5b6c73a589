//! RecordAnswerHandler - Records or revises one answer of a session.

use std::sync::Arc;

use crate::domain::assessment::{Answer, AssessmentError};
use crate::domain::foundation::SessionId;
use crate::ports::LedgerRepository;

/// Command to record an answer.
#[derive(Debug, Clone)]
pub struct RecordAnswerCommand {
    pub session_id: SessionId,
    pub answer: Answer,
}

/// Progress after recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordAnswerResult {
    pub answered: usize,
    pub remaining: usize,
}

/// Handler for recording answers.
pub struct RecordAnswerHandler {
    repository: Arc<dyn LedgerRepository>,
}

impl RecordAnswerHandler {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    /// Rejected answers leave the stored ledger untouched.
    pub async fn handle(&self, cmd: RecordAnswerCommand) -> Result<RecordAnswerResult, AssessmentError> {
        let mut ledger = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(cmd.session_id))?;

        ledger.record(cmd.answer)?;
        self.repository.save(&ledger).await?;

        Ok(RecordAnswerResult {
            answered: ledger.answered_count(),
            remaining: ledger.unanswered().len(),
        })
    }
}
