//! Selection weighter - folds the self-reported top factors into the tally.

use serde::{Deserialize, Serialize};

use super::{AssessmentError, FactorName, ResponseLedger, Tally};

/// Weighted score of one factor before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: FactorName,
    pub tally: u32,
    pub selected: bool,
    pub score: f64,
}

/// Weighted scores covering the whole catalog, in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedScores {
    entries: Vec<FactorScore>,
}

impl WeightedScores {
    pub fn iter(&self) -> impl Iterator<Item = &FactorScore> {
        self.entries.iter()
    }

    pub fn score(&self, factor: &FactorName) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| &e.factor == factor)
            .map(|e| e.score)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<FactorScore> {
        self.entries
    }
}

/// Applies an additive boost to every self-selected factor.
#[derive(Debug, Clone, Copy)]
pub struct SelectionWeighter {
    boost: f64,
}

impl SelectionWeighter {
    pub fn new(boost: f64) -> Self {
        Self { boost }
    }

    /// score = tally + boost when the factor was selected, tally otherwise.
    ///
    /// Selections naming a factor twice are boosted once; selections outside
    /// the tally's catalog are ignored.
    pub fn weigh(&self, tally: &Tally, selected: &[&FactorName]) -> WeightedScores {
        let entries = tally
            .iter()
            .map(|entry| {
                let is_selected = selected.contains(&&entry.factor);
                let boost = if is_selected { self.boost } else { 0.0 };
                FactorScore {
                    factor: entry.factor.clone(),
                    tally: entry.count,
                    selected: is_selected,
                    score: f64::from(entry.count) + boost,
                }
            })
            .collect();

        WeightedScores { entries }
    }

    /// Weighs a tally with the multi-select answer of a sealed ledger.
    ///
    /// # Errors
    ///
    /// - `NotSealed` if the ledger is still open
    pub fn weigh_ledger(
        &self,
        tally: &Tally,
        ledger: &ResponseLedger,
    ) -> Result<WeightedScores, AssessmentError> {
        ledger.ensure_sealed()?;
        Ok(self.weigh(tally, &ledger.selected_factors()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::FactorCatalog;

    fn factor(name: &str) -> FactorName {
        FactorName::new(name).unwrap()
    }

    fn tally(counts: &[(&str, u32)]) -> Tally {
        let catalog = FactorCatalog::new(counts.iter().map(|(n, _)| *n)).unwrap();
        let mut tally = Tally::new(&catalog);
        for (name, count) in counts {
            for _ in 0..*count {
                tally.increment(&factor(name));
            }
        }
        tally
    }

    #[test]
    fn selected_factors_receive_boost() {
        let t = tally(&[("Learning", 3), ("Security", 1), ("Variety", 0)]);
        let security = factor("Security");
        let scores = SelectionWeighter::new(0.5).weigh(&t, &[&security]);

        assert_eq!(scores.score(&factor("Learning")), Some(3.0));
        assert_eq!(scores.score(&factor("Security")), Some(1.5));
        assert_eq!(scores.score(&factor("Variety")), Some(0.0));
    }

    #[test]
    fn never_picked_selected_factor_scores_exactly_the_boost() {
        let t = tally(&[("Learning", 1), ("Variety", 0)]);
        let variety = factor("Variety");
        let scores = SelectionWeighter::new(0.5).weigh(&t, &[&variety]);
        assert_eq!(scores.score(&variety), Some(0.5));
    }

    #[test]
    fn duplicate_selection_boosts_once() {
        let t = tally(&[("Learning", 2)]);
        let learning = factor("Learning");
        let scores = SelectionWeighter::new(1.0).weigh(&t, &[&learning, &learning]);
        assert_eq!(scores.score(&learning), Some(3.0));
    }

    #[test]
    fn output_covers_every_factor() {
        let t = tally(&[("Learning", 0), ("Security", 0), ("Variety", 0)]);
        let scores = SelectionWeighter::new(0.5).weigh(&t, &[]);
        assert_eq!(scores.len(), 3);
        assert!(scores.iter().all(|s| !s.selected && s.score == 0.0));
    }

    #[test]
    fn weigh_ledger_uses_recorded_selection() {
        let mut ledger = ResponseLedger::answered_fixture(
            &[(1, "a"), (2, "a"), (3, "a"), (4, "a")],
            &["Variety", "Purpose"],
        );
        let t = tally(&[("Learning", 2), ("Security", 1), ("Variety", 1), ("Purpose", 0)]);
        let weigher = SelectionWeighter::new(0.5);

        assert_eq!(weigher.weigh_ledger(&t, &ledger), Err(AssessmentError::NotSealed));

        ledger.seal().unwrap();
        let scores = weigher.weigh_ledger(&t, &ledger).unwrap();
        assert_eq!(scores.score(&factor("Variety")), Some(1.5));
        assert_eq!(scores.score(&factor("Purpose")), Some(0.5));
        assert_eq!(scores.score(&factor("Learning")), Some(2.0));
    }
}
