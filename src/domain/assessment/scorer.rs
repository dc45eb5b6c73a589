//! Profile scorer - runs the full scoring pipeline over a sealed ledger.
//!
//! ledger → {ConsistencyChecker, GroupTally} → SelectionWeighter → ProfileRanker

use std::sync::Arc;
use tracing::info;

use super::{
    AssessmentError, BankDefect, ConsistencyChecker, GroupTally, Profile, ProfileRanker,
    QuestionBank, ResponseLedger, ScoringPolicy, SelectionWeighter,
};
use crate::domain::foundation::SessionId;

/// A question bank paired with the policy used to score it.
///
/// Shared read-only across sessions.
#[derive(Debug, Clone)]
pub struct ProfileScorer {
    bank: Arc<QuestionBank>,
    policy: ScoringPolicy,
}

impl ProfileScorer {
    /// Pairs a bank with a policy.
    ///
    /// # Errors
    ///
    /// - `MalformedBank` if the policy requires more selections than the
    ///   bank's multi-select question offers
    pub fn new(bank: Arc<QuestionBank>, policy: ScoringPolicy) -> Result<Self, AssessmentError> {
        let available = bank.selection_question().options().len();
        if policy.required_selections() > available {
            return Err(BankDefect::SelectionExceedsOptions {
                required: policy.required_selections(),
                available,
            }
            .into());
        }
        Ok(Self { bank, policy })
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Opens an empty ledger for a new session.
    pub fn open_ledger(&self, session_id: SessionId) -> ResponseLedger {
        ResponseLedger::new(
            session_id,
            Arc::clone(&self.bank),
            self.policy.required_selections(),
        )
    }

    /// Computes the profile of a sealed ledger.
    ///
    /// Pure with respect to its input: the same sealed ledger always yields
    /// the same profile.
    ///
    /// # Errors
    ///
    /// - `NotSealed` if the ledger is still open
    pub fn score(&self, ledger: &ResponseLedger) -> Result<Profile, AssessmentError> {
        ledger.ensure_sealed()?;

        let consistency =
            ConsistencyChecker::check(ledger, self.policy.low_reliability_threshold())?;
        let tally = GroupTally::tally(ledger)?;
        let scores = SelectionWeighter::new(self.policy.selection_boost())
            .weigh_ledger(&tally, ledger)?;
        let profile = ProfileRanker::rank(scores, consistency);

        info!(
            session_id = %ledger.session_id(),
            top_factor = profile.entries().first().map(|e| e.factor.as_str()).unwrap_or_default(),
            picks_tallied = tally.total(),
            consistency_ratio = profile.consistency_ratio(),
            low_reliability = profile.is_low_reliability(),
            "Profile computed"
        );

        Ok(profile)
    }
}
