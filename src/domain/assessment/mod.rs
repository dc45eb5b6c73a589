//! Assessment Module - the motivational profile scoring engine.
//!
//! Turns a taker's answers to a fixed forced-choice inventory into a ranked
//! profile of motivational factors plus a reliability signal.
//!
//! # Components
//!
//! - `QuestionBank` - Validated, read-only catalog of questions and factors
//! - `ResponseLedger` - One answer per question for a single session
//! - `ConsistencyChecker` - Agreement between repeated questions and originals
//! - `GroupTally` - Forced-choice picks per factor
//! - `SelectionWeighter` - Boost for self-selected top factors
//! - `ProfileRanker` - Deterministic ranking into the final `Profile`
//! - `ProfileScorer` - Runs the pipeline with a `ScoringPolicy`
//!
//! Data flows QuestionBank → ResponseLedger → {ConsistencyChecker, GroupTally}
//! → SelectionWeighter → ProfileRanker. Everything here is synchronous and
//! free of I/O apart from optional bank loading.

mod answer;
mod bank;
mod consistency;
mod errors;
mod events;
mod factor;
mod ledger;
mod policy;
mod question;
mod ranker;
mod scorer;
mod tally;
mod weighter;

pub use answer::{Answer, AnswerChoice};
pub use bank::{
    BankDefinition, OptionDefinition, OptionView, QuestionBank, QuestionDefinition, QuestionView,
};
pub use consistency::{ConsistencyChecker, ConsistencyRecord, RepeatPair};
pub use errors::{AssessmentError, BankDefect};
pub use events::ProfileComputed;
pub use factor::{FactorCatalog, FactorName};
pub use ledger::{LedgerStatus, ResponseLedger};
pub use policy::{
    ScoringPolicy, DEFAULT_LOW_RELIABILITY_THRESHOLD, DEFAULT_REQUIRED_SELECTIONS,
    DEFAULT_SELECTION_BOOST,
};
pub use question::{OptionId, Question, QuestionId, QuestionKind, QuestionOption};
pub use ranker::{Profile, ProfileEntry, ProfileRanker};
pub use scorer::ProfileScorer;
pub use tally::{FactorCount, GroupTally, Tally};
pub use weighter::{FactorScore, SelectionWeighter, WeightedScores};
