//! Group tally - per-factor counts of forced-choice picks.

use serde::{Deserialize, Serialize};

use super::{AssessmentError, FactorCatalog, FactorName, QuestionKind, ResponseLedger};

/// Count of forced-choice picks for one factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorCount {
    pub factor: FactorName,
    pub count: u32,
}

/// Per-factor pick counts covering the whole catalog, in canonical order.
///
/// Factors never picked are present with a count of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    entries: Vec<FactorCount>,
}

impl Tally {
    /// A zeroed tally over every factor of the catalog.
    pub fn new(catalog: &FactorCatalog) -> Self {
        Self {
            entries: catalog
                .iter()
                .map(|factor| FactorCount {
                    factor: factor.clone(),
                    count: 0,
                })
                .collect(),
        }
    }

    /// Adds one pick. Returns false if the factor is not in the tally.
    pub fn increment(&mut self, factor: &FactorName) -> bool {
        match self.entries.iter_mut().find(|e| &e.factor == factor) {
            Some(entry) => {
                entry.count += 1;
                true
            }
            None => false,
        }
    }

    /// Picks recorded for a factor (zero if absent).
    pub fn count(&self, factor: &FactorName) -> u32 {
        self.entries
            .iter()
            .find(|e| &e.factor == factor)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Entries in canonical catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &FactorCount> {
        self.entries.iter()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregates forced-choice answers into a tally.
pub struct GroupTally;

impl GroupTally {
    /// Counts the group of every forced-choice answer in a sealed ledger.
    ///
    /// Repeat questions count like any other question, so a factor chosen on
    /// both an original and its repeat is counted twice. The multi-select
    /// answer is not counted here.
    ///
    /// # Errors
    ///
    /// - `NotSealed` if the ledger is still open
    pub fn tally(ledger: &ResponseLedger) -> Result<Tally, AssessmentError> {
        ledger.ensure_sealed()?;

        let bank = ledger.bank();
        let mut tally = Tally::new(bank.catalog());

        for question in bank.all_questions() {
            if question.kind() != QuestionKind::ForcedChoice {
                continue;
            }
            if let Some(group) = ledger.chosen_group(question.id()) {
                tally.increment(group);
            }
        }

        Ok(tally)
    }
}
