//! Profile ranker - the final, ordered motivational profile.

use serde::{Deserialize, Serialize};

use super::{ConsistencyRecord, FactorName, WeightedScores};

/// One ranked factor of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub factor: FactorName,
    pub score: f64,
    /// 1-based, unique across the profile.
    pub rank: usize,
    pub tally: u32,
    pub selected: bool,
}

/// Ranked profile of every catalog factor plus reliability metadata.
///
/// Immutable once built. Contains no timestamps, so equal inputs serialize
/// to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    factors: Vec<ProfileEntry>,
    consistency: ConsistencyRecord,
}

impl Profile {
    /// Entries in rank order.
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.factors
    }

    pub fn entry(&self, factor: &FactorName) -> Option<&ProfileEntry> {
        self.factors.iter().find(|e| &e.factor == factor)
    }

    pub fn consistency(&self) -> &ConsistencyRecord {
        &self.consistency
    }

    pub fn consistency_ratio(&self) -> f64 {
        self.consistency.ratio
    }

    pub fn is_low_reliability(&self) -> bool {
        self.consistency.low_reliability
    }
}

/// Orders weighted scores into a profile.
pub struct ProfileRanker;

impl ProfileRanker {
    /// Sorts factors by descending score and assigns ranks 1..=N.
    ///
    /// Ties are broken by canonical catalog position, which `WeightedScores`
    /// preserves, so the order is total and independent of any map iteration.
    pub fn rank(scores: WeightedScores, consistency: ConsistencyRecord) -> Profile {
        let mut ordered: Vec<_> = scores.into_entries().into_iter().enumerate().collect();
        ordered.sort_by(|(pos_a, a), (pos_b, b)| {
            b.score.total_cmp(&a.score).then(pos_a.cmp(pos_b))
        });

        let factors = ordered
            .into_iter()
            .enumerate()
            .map(|(i, (_, entry))| ProfileEntry {
                factor: entry.factor,
                score: entry.score,
                rank: i + 1,
                tally: entry.tally,
                selected: entry.selected,
            })
            .collect();

        Profile {
            factors,
            consistency,
        }
    }
}

#[cfg(test)]
impl Profile {
    /// Profile of a sealed fixture ledger answered with "a" throughout.
    pub(crate) fn test_fixture() -> Self {
        use super::{ProfileScorer, ResponseLedger, ScoringPolicy};
        use std::sync::Arc;

        let ledger = {
            let mut ledger = ResponseLedger::answered_fixture(
                &[(1, "a"), (2, "a"), (3, "a"), (4, "a")],
                &["Learning", "Purpose"],
            );
            ledger.seal().unwrap();
            ledger
        };
        let policy = ScoringPolicy::new(0.5, 2, 0.5).unwrap();
        let scorer = ProfileScorer::new(Arc::new(ledger.bank().clone()), policy).unwrap();
        scorer.score(&ledger).unwrap()
    }
}
