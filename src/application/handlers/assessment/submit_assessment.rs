//! SubmitAssessmentHandler - Seals a session and computes its profile.
//!
//! A failed score or publish leaves the stored ledger open, so the session
//! can be submitted again.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, Profile, ProfileComputed, ProfileScorer};
use crate::domain::foundation::{SerializableDomainEvent, SessionId};
use crate::ports::{EventPublisher, LedgerRepository};

/// Command to submit a session for scoring.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub session_id: SessionId,
    /// Propagated to the published event's metadata.
    pub correlation_id: Option<String>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentResult {
    pub profile: Profile,
    pub event: ProfileComputed,
}

/// Handler for submitting sessions.
pub struct SubmitAssessmentHandler {
    scorer: Arc<ProfileScorer>,
    repository: Arc<dyn LedgerRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitAssessmentHandler {
    pub fn new(
        scorer: Arc<ProfileScorer>,
        repository: Arc<dyn LedgerRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            scorer,
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAssessmentCommand,
    ) -> Result<SubmitAssessmentResult, AssessmentError> {
        // 1. Load and seal a working copy
        let mut ledger = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(cmd.session_id))?;

        ledger.seal()?;

        // 2. Score
        let profile = self.scorer.score(&ledger)?;

        // 3. Publish
        let event = ProfileComputed::new(cmd.session_id, profile.clone());
        let mut envelope = event.to_envelope()?;
        if let Some(correlation_id) = cmd.correlation_id {
            envelope = envelope.with_correlation_id(correlation_id);
        }
        self.event_publisher.publish(envelope).await?;

        // 4. Persist the sealed state; until here the stored ledger stays open
        self.repository.save(&ledger).await?;

        Ok(SubmitAssessmentResult { profile, event })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{event_bus, fixture_scorer, repository};
    use super::*;
    use crate::domain::assessment::{Answer, QuestionId, ResponseLedger};
    use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Publisher that fails while `down` is set.
    struct FlakyPublisher {
        down: AtomicBool,
    }

    #[async_trait]
    impl EventPublisher for FlakyPublisher {
        async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(DomainError::new(ErrorCode::InternalError, "broker down"));
            }
            Ok(())
        }
    }

    async fn stored_ledger(
        repo: &Arc<crate::adapters::InMemoryLedgerRepository>,
        choices: &[(u32, &str)],
    ) -> ResponseLedger {
        let mut ledger = fixture_scorer().open_ledger(SessionId::new());
        for (question, option) in choices {
            ledger.record(Answer::single(*question, *option)).unwrap();
        }
        ledger.record(Answer::multiple(5, ["Variety", "Purpose"])).unwrap();
        repo.save(&ledger).await.unwrap();
        ledger
    }

    #[tokio::test]
    async fn submit_seals_scores_and_publishes() {
        let repo = repository();
        let bus = event_bus();
        let ledger = stored_ledger(&repo, &[(1, "a"), (2, "a"), (3, "a"), (4, "a")]).await;
        let handler = SubmitAssessmentHandler::new(fixture_scorer(), repo.clone(), bus.clone());

        let result = handler
            .handle(SubmitAssessmentCommand {
                session_id: *ledger.session_id(),
                correlation_id: Some("req-42".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.profile.entries().len(), 4);
        assert_eq!(result.profile.entries()[0].factor.as_str(), "Learning");
        assert_eq!(result.profile.entries()[1].factor.as_str(), "Variety");

        let stored = repo.find_by_id(ledger.session_id()).await.unwrap().unwrap();
        assert!(stored.is_sealed());

        let events = bus.events_of_type("profile.computed.v1").await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, ledger.session_id().to_string());
        assert_eq!(events[0].metadata.correlation_id.as_deref(), Some("req-42"));
    }

    #[tokio::test]
    async fn incomplete_submission_is_rejected_and_can_be_retried() {
        let repo = repository();
        let bus = event_bus();
        let ledger = stored_ledger(&repo, &[(1, "a"), (3, "a"), (4, "a")]).await;
        let handler = SubmitAssessmentHandler::new(fixture_scorer(), repo.clone(), bus.clone());
        let cmd = SubmitAssessmentCommand {
            session_id: *ledger.session_id(),
            correlation_id: None,
        };

        let result = handler.handle(cmd.clone()).await;
        assert_eq!(
            result.unwrap_err(),
            AssessmentError::IncompleteSubmission {
                missing: vec![QuestionId::new(2)],
            }
        );
        assert_eq!(bus.event_count().await, 0);

        let mut stored = repo.find_by_id(ledger.session_id()).await.unwrap().unwrap();
        assert!(!stored.is_sealed());
        stored.record(Answer::single(2, "b")).unwrap();
        repo.save(&stored).await.unwrap();

        assert!(handler.handle(cmd).await.is_ok());
        assert_eq!(bus.event_count().await, 1);
    }

    #[tokio::test]
    async fn second_submission_is_rejected() {
        let repo = repository();
        let ledger = stored_ledger(&repo, &[(1, "a"), (2, "a"), (3, "a"), (4, "a")]).await;
        let handler = SubmitAssessmentHandler::new(fixture_scorer(), repo.clone(), event_bus());
        let cmd = SubmitAssessmentCommand {
            session_id: *ledger.session_id(),
            correlation_id: None,
        };

        handler.handle(cmd.clone()).await.unwrap();
        assert_eq!(handler.handle(cmd).await.unwrap_err(), AssessmentError::AlreadySealed);
    }

    #[tokio::test]
    async fn unknown_session_is_reported() {
        let handler = SubmitAssessmentHandler::new(fixture_scorer(), repository(), event_bus());
        let session_id = SessionId::new();
        let result = handler
            .handle(SubmitAssessmentCommand {
                session_id,
                correlation_id: None,
            })
            .await;
        assert_eq!(result.unwrap_err(), AssessmentError::SessionNotFound(session_id));
    }

    #[tokio::test]
    async fn failed_publish_leaves_session_open_for_resubmission() {
        let repo = repository();
        let ledger = stored_ledger(&repo, &[(1, "a"), (2, "a"), (3, "a"), (4, "a")]).await;
        let publisher = Arc::new(FlakyPublisher {
            down: AtomicBool::new(true),
        });
        let handler = SubmitAssessmentHandler::new(fixture_scorer(), repo.clone(), publisher.clone());
        let cmd = SubmitAssessmentCommand {
            session_id: *ledger.session_id(),
            correlation_id: None,
        };

        let err = handler.handle(cmd.clone()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InternalError);
        let stored = repo.find_by_id(ledger.session_id()).await.unwrap().unwrap();
        assert!(!stored.is_sealed());

        publisher.down.store(false, Ordering::SeqCst);
        let result = handler.handle(cmd).await.unwrap();
        assert_eq!(result.profile.entries().len(), 4);
        let stored = repo.find_by_id(ledger.session_id()).await.unwrap().unwrap();
        assert!(stored.is_sealed());
    }
}
