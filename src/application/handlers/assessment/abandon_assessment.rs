//! AbandonAssessmentHandler - Discards a session's ledger.

use std::sync::Arc;
use tracing::info;

use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::SessionId;
use crate::ports::LedgerRepository;

/// Command to abandon a session, sealed or not.
#[derive(Debug, Clone)]
pub struct AbandonAssessmentCommand {
    pub session_id: SessionId,
}

/// Handler for abandoning sessions.
pub struct AbandonAssessmentHandler {
    repository: Arc<dyn LedgerRepository>,
}

impl AbandonAssessmentHandler {
    pub fn new(repository: Arc<dyn LedgerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: AbandonAssessmentCommand) -> Result<(), AssessmentError> {
        self.repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(cmd.session_id))?;

        self.repository.delete(&cmd.session_id).await?;
        info!(session_id = %cmd.session_id, "Assessment abandoned");
        Ok(())
    }
}
