//! Question bank - the immutable, validated catalog of questions.
//!
//! A bank is described by a [`BankDefinition`] (plain serde data, usually
//! YAML) and turned into a [`QuestionBank`] by a single validating
//! construction step. Any invariant violation fails construction with
//! `MalformedBank`, so a bank that exists is always safe to score against.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::{
    AssessmentError, BankDefect, FactorCatalog, FactorName, OptionId, Question, QuestionId,
    QuestionKind, QuestionOption,
};

/// Reference bank shipped with the crate.
const REFERENCE_BANK_YAML: &str = include_str!("../../../data/reference_bank.yaml");

static REFERENCE_BANK: OnceCell<Arc<QuestionBank>> = OnceCell::new();

// ════════════════════════════════════════════════════════════════════════════════
// Definition (untrusted input)
// ════════════════════════════════════════════════════════════════════════════════

/// Serialized form of a question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDefinition {
    /// Factor names in canonical order.
    pub factors: Vec<String>,
    /// Questions in presentation order.
    pub questions: Vec<QuestionDefinition>,
}

/// Serialized form of a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_of: Option<u32>,
    pub options: Vec<OptionDefinition>,
}

/// Serialized form of an answer option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDefinition {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Client view
// ════════════════════════════════════════════════════════════════════════════════

/// A question as presented to a test-taker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<OptionView>,
}

/// An option as presented to a test-taker; the group is hidden unless revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionView {
    pub id: OptionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<FactorName>,
}

// ════════════════════════════════════════════════════════════════════════════════
// QuestionBank
// ════════════════════════════════════════════════════════════════════════════════

/// Validated, read-only question bank.
///
/// # Invariants
///
/// - Question ids are `1..=N` in presentation order
/// - Every forced-choice question has at least two options, each tagged
///   with a group from the catalog
/// - Every repeat targets an earlier, non-repeat forced-choice question and
///   matches its groups position-for-position
/// - Exactly one multi-select question, whose option ids are catalog factors
#[derive(Debug, Clone)]
pub struct QuestionBank {
    catalog: FactorCatalog,
    questions: Vec<Question>,
    index: HashMap<QuestionId, usize>,
    selection: usize,
}

impl QuestionBank {
    /// Validates a definition and builds the bank.
    ///
    /// # Errors
    ///
    /// - `MalformedBank` naming the first violated invariant
    pub fn new(definition: BankDefinition) -> Result<Self, AssessmentError> {
        let catalog = FactorCatalog::new(definition.factors)?;

        if definition.questions.is_empty() {
            return Err(BankDefect::EmptyBank.into());
        }

        let mut questions = Vec::with_capacity(definition.questions.len());
        for (position, def) in definition.questions.into_iter().enumerate() {
            let expected = QuestionId::new(position as u32 + 1);
            let found = QuestionId::new(def.id);
            if found != expected {
                return Err(BankDefect::NonSequentialId {
                    position,
                    expected,
                    found,
                }
                .into());
            }
            questions.push(Self::build_question(&catalog, def)?);
        }

        for question in &questions {
            if let Some(target) = question.repeat_of() {
                Self::check_repeat(&questions, question, target)?;
            }
        }

        let selections: Vec<usize> = questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.kind() == QuestionKind::MultiSelect)
            .map(|(i, _)| i)
            .collect();
        let selection = match selections.as_slice() {
            [only] => *only,
            other => return Err(BankDefect::SelectionQuestionCount(other.len()).into()),
        };

        let index = questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.id(), i))
            .collect();

        let bank = Self {
            catalog,
            questions,
            index,
            selection,
        };

        info!(
            questions = bank.questions.len(),
            factors = bank.catalog.len(),
            repeats = bank.repeat_pairs().len(),
            "Question bank validated"
        );

        Ok(bank)
    }

    /// Returns the shared reference bank, validating it on first use.
    pub fn reference() -> Result<Arc<QuestionBank>, AssessmentError> {
        REFERENCE_BANK
            .get_or_try_init(|| Self::from_yaml_str(REFERENCE_BANK_YAML).map(Arc::new))
            .cloned()
    }

    /// Parses and validates a YAML bank definition.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AssessmentError> {
        let definition: BankDefinition = serde_yaml::from_str(yaml)
            .map_err(|e| BankDefect::Unreadable(e.to_string()))?;
        Self::new(definition)
    }

    /// Parses and validates a JSON bank definition.
    pub fn from_json_str(json: &str) -> Result<Self, AssessmentError> {
        let definition: BankDefinition = serde_json::from_str(json)
            .map_err(|e| BankDefect::Unreadable(e.to_string()))?;
        Self::new(definition)
    }

    /// Loads a bank from disk; `.json` files are read as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssessmentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BankDefect::Unreadable(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// All questions in presentation order.
    pub fn all_questions(&self) -> &[Question] {
        &self.questions
    }

    /// Finds a question by id.
    ///
    /// # Errors
    ///
    /// - `UnknownQuestion` if no question has this id
    pub fn question_by_id(&self, id: QuestionId) -> Result<&Question, AssessmentError> {
        self.index
            .get(&id)
            .map(|&i| &self.questions[i])
            .ok_or(AssessmentError::UnknownQuestion(id))
    }

    pub fn catalog(&self) -> &FactorCatalog {
        &self.catalog
    }

    /// The closing question where the taker names their top factors.
    pub fn selection_question(&self) -> &Question {
        &self.questions[self.selection]
    }

    /// (original, repeat) id pairs in presentation order of the repeats.
    pub fn repeat_pairs(&self) -> Vec<(QuestionId, QuestionId)> {
        self.questions
            .iter()
            .filter_map(|q| q.repeat_of().map(|original| (original, q.id())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions as shown to a taker. Groups are omitted unless `reveal_groups`.
    pub fn client_view(&self, reveal_groups: bool) -> Vec<QuestionView> {
        self.questions
            .iter()
            .map(|q| QuestionView {
                id: q.id(),
                text: q.text().to_string(),
                kind: q.kind(),
                options: q
                    .options()
                    .iter()
                    .map(|o| OptionView {
                        id: o.id().clone(),
                        text: o.text().to_string(),
                        group: if reveal_groups { o.group().cloned() } else { None },
                    })
                    .collect(),
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn build_question(
        catalog: &FactorCatalog,
        def: QuestionDefinition,
    ) -> Result<Question, BankDefect> {
        let question_id = QuestionId::new(def.id);
        let minimum = match def.kind {
            QuestionKind::ForcedChoice => 2,
            QuestionKind::MultiSelect => 1,
        };
        if def.options.len() < minimum {
            return Err(BankDefect::TooFewOptions {
                question_id,
                count: def.options.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut options = Vec::with_capacity(def.options.len());

        for option in def.options {
            let option_id = OptionId::new(option.id);
            if !seen.insert(option_id.clone()) {
                return Err(BankDefect::DuplicateOption {
                    question_id,
                    option_id,
                });
            }

            let group = match def.kind {
                QuestionKind::ForcedChoice => {
                    let name = option.group.ok_or_else(|| BankDefect::MissingGroup {
                        question_id,
                        option_id: option_id.clone(),
                    })?;
                    let factor = catalog.find(name.trim()).cloned().ok_or_else(|| {
                        BankDefect::UnknownGroup {
                            question_id,
                            option_id: option_id.clone(),
                            group: name.clone(),
                        }
                    })?;
                    Some(factor)
                }
                QuestionKind::MultiSelect => {
                    if catalog.find(option_id.as_str()).is_none() {
                        return Err(BankDefect::UnknownSelectionFactor {
                            question_id,
                            option_id,
                        });
                    }
                    None
                }
            };

            options.push(QuestionOption::new(option_id, option.text, group));
        }

        let repeat_of = def.repeat_of.map(QuestionId::new);
        if let (QuestionKind::MultiSelect, Some(target)) = (def.kind, repeat_of) {
            return Err(BankDefect::InvalidRepeatTarget {
                question_id,
                target,
                reason: "multi-select questions cannot be repeats",
            });
        }

        Ok(Question::new(question_id, def.text, def.kind, options, repeat_of))
    }

    fn check_repeat(
        questions: &[Question],
        repeat: &Question,
        target: QuestionId,
    ) -> Result<(), BankDefect> {
        let invalid = |reason| BankDefect::InvalidRepeatTarget {
            question_id: repeat.id(),
            target,
            reason,
        };

        if target >= repeat.id() {
            return Err(invalid("target must be an earlier question"));
        }
        let original = questions
            .iter()
            .find(|q| q.id() == target)
            .ok_or_else(|| invalid("target does not exist"))?;
        if original.is_repeat() {
            return Err(invalid("target is itself a repeat"));
        }
        if original.kind() != QuestionKind::ForcedChoice {
            return Err(invalid("target is not a forced-choice question"));
        }

        let mut original_groups = original.groups();
        let mut repeat_groups = repeat.groups();
        let mut position = 0;
        loop {
            match (original_groups.next(), repeat_groups.next()) {
                (None, None) => return Ok(()),
                (Some(a), Some(b)) if a == b => position += 1,
                _ => {
                    return Err(BankDefect::RepeatMismatch {
                        question_id: repeat.id(),
                        original: target,
                        position,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
impl BankDefinition {
    /// Small bank: four factors, three standard questions, one repeat of
    /// question 1 and a multi-select question 5.
    pub(crate) fn test_fixture() -> Self {
        fn forced(id: u32, options: &[(&str, &str)], repeat_of: Option<u32>) -> QuestionDefinition {
            QuestionDefinition {
                id,
                text: format!("Question {}", id),
                kind: QuestionKind::ForcedChoice,
                repeat_of,
                options: options
                    .iter()
                    .map(|(id, group)| OptionDefinition {
                        id: id.to_string(),
                        text: format!("{} statement", group),
                        group: Some(group.to_string()),
                    })
                    .collect(),
            }
        }

        let factors = vec!["Learning", "Security", "Variety", "Purpose"];
        let selection = QuestionDefinition {
            id: 5,
            text: "Choose your top factors".to_string(),
            kind: QuestionKind::MultiSelect,
            repeat_of: None,
            options: factors
                .iter()
                .map(|f| OptionDefinition {
                    id: f.to_string(),
                    text: f.to_string(),
                    group: None,
                })
                .collect(),
        };

        Self {
            factors: factors.iter().map(|f| f.to_string()).collect(),
            questions: vec![
                forced(1, &[("a", "Learning"), ("b", "Security"), ("c", "Variety")], None),
                forced(2, &[("a", "Variety"), ("b", "Purpose"), ("c", "Learning")], None),
                forced(3, &[("a", "Security"), ("b", "Purpose")], None),
                forced(4, &[("a", "Learning"), ("b", "Security"), ("c", "Variety")], Some(1)),
                selection,
            ],
        }
    }
}
