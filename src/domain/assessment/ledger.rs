//! Response ledger - one answer per question for a single session.
//!
//! The ledger validates every answer against the bank as it is recorded and
//! is sealed once the taker submits. Only a sealed ledger can be scored.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::{
    Answer, AnswerChoice, AssessmentError, FactorName, OptionId, QuestionBank, QuestionId,
    QuestionKind,
};
use crate::domain::foundation::SessionId;

/// Lifecycle status of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LedgerStatus {
    #[default]
    Open,
    Sealed,
}

impl LedgerStatus {
    /// Returns true if answers can still be recorded.
    pub fn is_mutable(&self) -> bool {
        matches!(self, LedgerStatus::Open)
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LedgerStatus::Open => "Open",
            LedgerStatus::Sealed => "Sealed",
        };
        write!(f, "{}", s)
    }
}

/// Answers of one session, keyed by question.
///
/// # Invariants
///
/// - At most one answer per question; recording again replaces it
/// - Every stored answer references a real question and real option(s)
/// - Multi-select answers hold exactly `required_selections` distinct factors
/// - A sealed ledger has an answer for every question and never changes
#[derive(Debug, Clone)]
pub struct ResponseLedger {
    session_id: SessionId,
    bank: Arc<QuestionBank>,
    required_selections: usize,
    answers: BTreeMap<QuestionId, Answer>,
    status: LedgerStatus,
}

impl ResponseLedger {
    /// Opens an empty ledger against a bank.
    ///
    /// `required_selections` must not exceed the bank's selection options;
    /// outside the crate ledgers come from `ProfileScorer::open_ledger`.
    pub(crate) fn new(session_id: SessionId, bank: Arc<QuestionBank>, required_selections: usize) -> Self {
        Self {
            session_id,
            bank,
            required_selections,
            answers: BTreeMap::new(),
            status: LedgerStatus::Open,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn status(&self) -> LedgerStatus {
        self.status
    }

    pub fn is_sealed(&self) -> bool {
        self.status == LedgerStatus::Sealed
    }

    pub fn required_selections(&self) -> usize {
        self.required_selections
    }

    /// All recorded answers in presentation order.
    pub fn answers(&self) -> impl Iterator<Item = &Answer> + '_ {
        self.answers.values()
    }

    pub fn answer_for(&self, question_id: QuestionId) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Questions still lacking an answer, in presentation order.
    pub fn unanswered(&self) -> Vec<QuestionId> {
        self.bank
            .all_questions()
            .iter()
            .map(|q| q.id())
            .filter(|id| !self.answers.contains_key(id))
            .collect()
    }

    /// Factor group of the option chosen for a forced-choice question.
    pub fn chosen_group(&self, question_id: QuestionId) -> Option<&FactorName> {
        let option = self.answer_for(question_id)?.selected_option()?;
        self.bank.question_by_id(question_id).ok()?.group_of(option)
    }

    /// Factors named in the multi-select answer, if recorded.
    pub fn selected_factors(&self) -> Vec<&FactorName> {
        let question_id = self.bank.selection_question().id();
        self.answer_for(question_id)
            .and_then(Answer::selections)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.bank.catalog().find(id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Fails with `NotSealed` unless the ledger has been sealed.
    pub fn ensure_sealed(&self) -> Result<(), AssessmentError> {
        if self.is_sealed() {
            Ok(())
        } else {
            Err(AssessmentError::NotSealed)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records or revises the answer to a question.
    ///
    /// On error the ledger is left unchanged.
    ///
    /// # Errors
    ///
    /// - `AlreadySealed` if the ledger is sealed
    /// - `UnknownQuestion` if the question is not in the bank
    /// - `AnswerKindMismatch` if a single choice answers a multi-select question or vice versa
    /// - `UnknownOption` if any referenced option does not exist
    /// - `WrongSelectionCount` if a multi-select answer does not name exactly
    ///   the required number of distinct factors
    pub fn record(&mut self, answer: Answer) -> Result<(), AssessmentError> {
        if !self.status.is_mutable() {
            return Err(AssessmentError::AlreadySealed);
        }

        let answer = self.validate(answer)?;
        let question_id = answer.question_id;
        let revised = self.answers.insert(question_id, answer).is_some();

        debug!(
            session_id = %self.session_id,
            question_id = %question_id,
            revised,
            answered = self.answers.len(),
            "Answer recorded"
        );

        Ok(())
    }

    /// Seals the ledger, making it immutable.
    ///
    /// # Errors
    ///
    /// - `AlreadySealed` if the ledger is sealed
    /// - `IncompleteSubmission` listing every unanswered question
    pub fn seal(&mut self) -> Result<(), AssessmentError> {
        if !self.status.is_mutable() {
            return Err(AssessmentError::AlreadySealed);
        }

        let missing = self.unanswered();
        if !missing.is_empty() {
            debug!(
                session_id = %self.session_id,
                missing = missing.len(),
                "Seal rejected, submission incomplete"
            );
            return Err(AssessmentError::IncompleteSubmission { missing });
        }

        self.status = LedgerStatus::Sealed;
        debug!(session_id = %self.session_id, "Ledger sealed");
        Ok(())
    }

    fn validate(&self, answer: Answer) -> Result<Answer, AssessmentError> {
        let question = self.bank.question_by_id(answer.question_id)?;
        let question_id = question.id();

        let choice = match (question.kind(), answer.choice) {
            (QuestionKind::ForcedChoice, AnswerChoice::Single(option_id)) => {
                if question.option(&option_id).is_none() {
                    return Err(AssessmentError::UnknownOption {
                        question_id,
                        option_id,
                    });
                }
                AnswerChoice::Single(option_id)
            }
            (QuestionKind::MultiSelect, AnswerChoice::Multiple(option_ids)) => {
                let mut distinct: Vec<OptionId> = Vec::with_capacity(option_ids.len());
                for option_id in option_ids {
                    if question.option(&option_id).is_none() {
                        return Err(AssessmentError::UnknownOption {
                            question_id,
                            option_id,
                        });
                    }
                    if !distinct.contains(&option_id) {
                        distinct.push(option_id);
                    }
                }
                if distinct.len() != self.required_selections {
                    return Err(AssessmentError::WrongSelectionCount {
                        question_id,
                        expected: self.required_selections,
                        actual: distinct.len(),
                    });
                }
                AnswerChoice::Multiple(distinct)
            }
            (expected, _) => {
                return Err(AssessmentError::AnswerKindMismatch {
                    question_id,
                    expected,
                })
            }
        };

        Ok(Answer {
            question_id,
            choice,
        })
    }
}

#[cfg(test)]
impl ResponseLedger {
    /// Ledger over the fixture bank requiring two selections.
    pub(crate) fn test_fixture() -> Self {
        let bank = QuestionBank::new(super::BankDefinition::test_fixture())
            .expect("fixture bank is valid");
        Self::new(SessionId::new(), Arc::new(bank), 2)
    }

    /// Records every fixture answer from `(question, option)` pairs plus a selection.
    pub(crate) fn answered_fixture(choices: &[(u32, &str)], selection: &[&str]) -> Self {
        let mut ledger = Self::test_fixture();
        for (question, option) in choices {
            ledger.record(Answer::single(*question, *option)).unwrap();
        }
        ledger.record(Answer::multiple(5, selection.iter().copied())).unwrap();
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_A: &[(u32, &str)] = &[(1, "a"), (2, "a"), (3, "a"), (4, "a")];

    #[test]
    fn new_ledger_is_open_and_empty() {
        let ledger = ResponseLedger::test_fixture();
        assert_eq!(ledger.status(), LedgerStatus::Open);
        assert_eq!(ledger.answered_count(), 0);
        assert_eq!(ledger.unanswered().len(), 5);
    }

    #[test]
    fn record_replaces_previous_answer() {
        let mut ledger = ResponseLedger::test_fixture();
        ledger.record(Answer::single(1, "a")).unwrap();
        ledger.record(Answer::single(1, "c")).unwrap();

        assert_eq!(ledger.answered_count(), 1);
        assert_eq!(
            ledger.answer_for(QuestionId::new(1)),
            Some(&Answer::single(1, "c"))
        );
    }

    #[test]
    fn record_rejects_unknown_question() {
        let mut ledger = ResponseLedger::test_fixture();
        let result = ledger.record(Answer::single(41, "a"));
        assert_eq!(result, Err(AssessmentError::UnknownQuestion(QuestionId::new(41))));
        assert_eq!(ledger.answered_count(), 0);
    }

    #[test]
    fn record_rejects_unknown_option_and_keeps_previous_answer() {
        let mut ledger = ResponseLedger::test_fixture();
        ledger.record(Answer::single(3, "a")).unwrap();

        let result = ledger.record(Answer::single(3, "c"));
        assert_eq!(
            result,
            Err(AssessmentError::UnknownOption {
                question_id: QuestionId::new(3),
                option_id: OptionId::new("c"),
            })
        );
        assert_eq!(
            ledger.answer_for(QuestionId::new(3)),
            Some(&Answer::single(3, "a"))
        );
    }

    #[test]
    fn record_rejects_kind_mismatch() {
        let mut ledger = ResponseLedger::test_fixture();
        assert!(matches!(
            ledger.record(Answer::multiple(1, ["a", "b"])),
            Err(AssessmentError::AnswerKindMismatch { expected: QuestionKind::ForcedChoice, .. })
        ));
        assert!(matches!(
            ledger.record(Answer::single(5, "Learning")),
            Err(AssessmentError::AnswerKindMismatch { expected: QuestionKind::MultiSelect, .. })
        ));
    }

    #[test]
    fn record_rejects_wrong_selection_count() {
        let mut ledger = ResponseLedger::test_fixture();
        let result = ledger.record(Answer::multiple(5, ["Learning"]));
        assert_eq!(
            result,
            Err(AssessmentError::WrongSelectionCount {
                question_id: QuestionId::new(5),
                expected: 2,
                actual: 1,
            })
        );
        assert!(ledger.answer_for(QuestionId::new(5)).is_none());

        ledger.record(Answer::multiple(5, ["Learning", "Purpose"])).unwrap();
        assert_eq!(ledger.selected_factors().len(), 2);
    }

    #[test]
    fn duplicate_selections_count_once() {
        let mut ledger = ResponseLedger::test_fixture();
        let result = ledger.record(Answer::multiple(5, ["Learning", "Learning"]));
        assert!(matches!(
            result,
            Err(AssessmentError::WrongSelectionCount { actual: 1, .. })
        ));
    }

    #[test]
    fn selection_must_name_catalog_factors() {
        let mut ledger = ResponseLedger::test_fixture();
        let result = ledger.record(Answer::multiple(5, ["Learning", "Fame"]));
        assert!(matches!(result, Err(AssessmentError::UnknownOption { .. })));
    }

    #[test]
    fn seal_rejects_incomplete_submission() {
        let mut ledger = ResponseLedger::test_fixture();
        ledger.record(Answer::single(1, "a")).unwrap();
        ledger.record(Answer::single(3, "b")).unwrap();

        let result = ledger.seal();
        assert_eq!(
            result,
            Err(AssessmentError::IncompleteSubmission {
                missing: vec![QuestionId::new(2), QuestionId::new(4), QuestionId::new(5)],
            })
        );
        assert_eq!(ledger.status(), LedgerStatus::Open);
    }

    #[test]
    fn seal_succeeds_after_missing_answers_supplied() {
        let mut ledger = ResponseLedger::test_fixture();
        ledger.record(Answer::single(1, "a")).unwrap();
        ledger.record(Answer::single(3, "b")).unwrap();
        ledger.record(Answer::single(4, "a")).unwrap();
        ledger.record(Answer::multiple(5, ["Learning", "Purpose"])).unwrap();
        assert!(ledger.seal().is_err());

        ledger.record(Answer::single(2, "b")).unwrap();
        assert!(ledger.seal().is_ok());
        assert!(ledger.is_sealed());
    }

    #[test]
    fn sealed_ledger_rejects_changes() {
        let mut ledger = ResponseLedger::answered_fixture(ALL_A, &["Learning", "Variety"]);
        ledger.seal().unwrap();

        assert_eq!(ledger.record(Answer::single(1, "b")), Err(AssessmentError::AlreadySealed));
        assert_eq!(ledger.seal(), Err(AssessmentError::AlreadySealed));
        assert_eq!(
            ledger.answer_for(QuestionId::new(1)),
            Some(&Answer::single(1, "a"))
        );
    }

    #[test]
    fn answers_come_back_in_presentation_order() {
        let mut ledger = ResponseLedger::test_fixture();
        ledger.record(Answer::multiple(5, ["Learning", "Purpose"])).unwrap();
        ledger.record(Answer::single(3, "a")).unwrap();
        ledger.record(Answer::single(1, "b")).unwrap();

        let ids: Vec<u32> = ledger.answers().map(|a| a.question_id.value()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn chosen_group_resolves_through_bank() {
        let ledger = ResponseLedger::answered_fixture(ALL_A, &["Learning", "Variety"]);
        assert_eq!(
            ledger.chosen_group(QuestionId::new(2)).map(|f| f.as_str()),
            Some("Variety")
        );
        assert_eq!(ledger.chosen_group(QuestionId::new(5)), None);
    }

    #[test]
    fn ensure_sealed_guards_scoring() {
        let mut ledger = ResponseLedger::answered_fixture(ALL_A, &["Learning", "Variety"]);
        assert_eq!(ledger.ensure_sealed(), Err(AssessmentError::NotSealed));
        ledger.seal().unwrap();
        assert_eq!(ledger.ensure_sealed(), Ok(()));
    }
}
