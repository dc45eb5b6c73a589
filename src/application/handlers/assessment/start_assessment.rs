//! StartAssessmentHandler - Opens a new session and hands out the questions.

use std::sync::Arc;
use tracing::info;

use crate::domain::assessment::{AssessmentError, ProfileScorer, QuestionView};
use crate::domain::foundation::SessionId;
use crate::ports::LedgerRepository;

/// Command to start a new assessment session.
#[derive(Debug, Clone, Default)]
pub struct StartAssessmentCommand {
    /// Include each option's factor group in the returned questions.
    pub reveal_groups: bool,
}

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct StartAssessmentResult {
    pub session_id: SessionId,
    pub questions: Vec<QuestionView>,
    pub required_selections: usize,
}

/// Handler for starting sessions.
pub struct StartAssessmentHandler {
    scorer: Arc<ProfileScorer>,
    repository: Arc<dyn LedgerRepository>,
}

impl StartAssessmentHandler {
    pub fn new(scorer: Arc<ProfileScorer>, repository: Arc<dyn LedgerRepository>) -> Self {
        Self { scorer, repository }
    }

    pub async fn handle(
        &self,
        cmd: StartAssessmentCommand,
    ) -> Result<StartAssessmentResult, AssessmentError> {
        let session_id = SessionId::new();
        let ledger = self.scorer.open_ledger(session_id);
        self.repository.save(&ledger).await?;

        info!(session_id = %session_id, "Assessment started");

        Ok(StartAssessmentResult {
            session_id,
            questions: self.scorer.bank().client_view(cmd.reveal_groups),
            required_selections: self.scorer.policy().required_selections(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{fixture_scorer, repository};
    use super::*;

    #[tokio::test]
    async fn start_persists_open_ledger_and_returns_questions() {
        let repo = repository();
        let handler = StartAssessmentHandler::new(fixture_scorer(), repo.clone());

        let result = handler.handle(StartAssessmentCommand::default()).await.unwrap();

        assert_eq!(result.questions.len(), 5);
        assert_eq!(result.required_selections, 2);
        assert!(result
            .questions
            .iter()
            .flat_map(|q| &q.options)
            .all(|o| o.group.is_none()));

        let ledger = repo.find_by_id(&result.session_id).await.unwrap().unwrap();
        assert!(!ledger.is_sealed());
        assert_eq!(ledger.answered_count(), 0);
    }

    #[tokio::test]
    async fn start_can_reveal_groups() {
        let handler = StartAssessmentHandler::new(fixture_scorer(), repository());
        let result = handler
            .handle(StartAssessmentCommand { reveal_groups: true })
            .await
            .unwrap();
        assert!(result.questions[0].options[0].group.is_some());
    }

    #[tokio::test]
    async fn each_start_opens_a_distinct_session() {
        let repo = repository();
        let handler = StartAssessmentHandler::new(fixture_scorer(), repo.clone());
        let a = handler.handle(StartAssessmentCommand::default()).await.unwrap();
        let b = handler.handle(StartAssessmentCommand::default()).await.unwrap();
        assert_ne!(a.session_id, b.session_id);
        assert_eq!(repo.len().await, 2);
    }
}
