//! Consistency checker - reliability signal from repeated questions.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{AssessmentError, FactorName, QuestionId, ResponseLedger};

/// Outcome for one (original, repeat) question pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatPair {
    pub original_id: QuestionId,
    pub repeat_id: QuestionId,
    pub original_group: FactorName,
    pub repeat_group: FactorName,
    pub consistent: bool,
}

/// Agreement between original and repeated questions.
///
/// Advisory only: a low ratio never blocks scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyRecord {
    pub ratio: f64,
    pub low_reliability: bool,
    pub pairs: Vec<RepeatPair>,
}

impl ConsistencyRecord {
    /// Number of pairs where both answers mapped to the same group.
    pub fn agreements(&self) -> usize {
        self.pairs.iter().filter(|p| p.consistent).count()
    }
}

/// Compares each repeat question with its original.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Computes the consistency record for a sealed ledger.
    ///
    /// # Algorithm
    /// ratio = agreements / pairs, where a pair agrees when the chosen
    /// options of original and repeat belong to the same group.
    ///
    /// # Edge Cases
    /// - No repeat pairs: ratio 1.0 (vacuously consistent)
    ///
    /// # Errors
    ///
    /// - `NotSealed` if the ledger is still open
    pub fn check(
        ledger: &ResponseLedger,
        low_reliability_threshold: f64,
    ) -> Result<ConsistencyRecord, AssessmentError> {
        ledger.ensure_sealed()?;

        let mut pairs = Vec::new();
        for (original_id, repeat_id) in ledger.bank().repeat_pairs() {
            let original_group = Self::group(ledger, original_id)?;
            let repeat_group = Self::group(ledger, repeat_id)?;
            pairs.push(RepeatPair {
                original_id,
                repeat_id,
                consistent: original_group == repeat_group,
                original_group,
                repeat_group,
            });
        }

        let ratio = if pairs.is_empty() {
            1.0
        } else {
            pairs.iter().filter(|p| p.consistent).count() as f64 / pairs.len() as f64
        };
        let low_reliability = ratio < low_reliability_threshold;

        if low_reliability {
            warn!(
                session_id = %ledger.session_id(),
                ratio,
                threshold = low_reliability_threshold,
                "Low reliability: repeat answers disagree with originals"
            );
        }

        Ok(ConsistencyRecord {
            ratio,
            low_reliability,
            pairs,
        })
    }

    fn group(ledger: &ResponseLedger, question_id: QuestionId) -> Result<FactorName, AssessmentError> {
        ledger
            .chosen_group(question_id)
            .cloned()
            .ok_or_else(|| AssessmentError::IncompleteSubmission {
                missing: vec![question_id],
            })
    }
}
