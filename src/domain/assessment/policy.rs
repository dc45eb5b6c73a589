//! Scoring policy - the tunable constants of the ranking algorithm.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Boost added to each factor named in the multi-select answer.
pub const DEFAULT_SELECTION_BOOST: f64 = 0.5;

/// Number of factors the taker must name in the multi-select answer.
pub const DEFAULT_REQUIRED_SELECTIONS: usize = 5;

/// Consistency ratios strictly below this are flagged as low reliability.
///
/// At 1.0 any mismatched repeat raises the flag; on the reference bank that
/// is every ratio of 2/3 or less.
pub const DEFAULT_LOW_RELIABILITY_THRESHOLD: f64 = 1.0;

/// Policy parameters for scoring a completed ledger.
///
/// # Invariants
///
/// - `0 < selection_boost <= 1`, so a factor that was only self-reported can
///   at most tie with a factor picked once in a forced-choice question
/// - `required_selections >= 1`
/// - `0 <= low_reliability_threshold <= 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicyParams")]
pub struct ScoringPolicy {
    selection_boost: f64,
    required_selections: usize,
    low_reliability_threshold: f64,
}

impl ScoringPolicy {
    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if any parameter is outside its allowed range
    pub fn new(
        selection_boost: f64,
        required_selections: usize,
        low_reliability_threshold: f64,
    ) -> Result<Self, ValidationError> {
        if !(selection_boost > 0.0 && selection_boost <= 1.0) {
            return Err(ValidationError::invalid_format(
                "selection_boost",
                format!("must be in (0, 1], got {}", selection_boost),
            ));
        }
        if required_selections == 0 {
            return Err(ValidationError::out_of_range(
                "required_selections",
                1,
                i64::MAX,
                0,
            ));
        }
        if !(0.0..=1.0).contains(&low_reliability_threshold) {
            return Err(ValidationError::invalid_format(
                "low_reliability_threshold",
                format!("must be in [0, 1], got {}", low_reliability_threshold),
            ));
        }

        Ok(Self {
            selection_boost,
            required_selections,
            low_reliability_threshold,
        })
    }

    pub fn selection_boost(&self) -> f64 {
        self.selection_boost
    }

    pub fn required_selections(&self) -> usize {
        self.required_selections
    }

    pub fn low_reliability_threshold(&self) -> f64 {
        self.low_reliability_threshold
    }
}

/// Unvalidated wire form; deserialization goes through `ScoringPolicy::new`.
#[derive(Deserialize)]
struct PolicyParams {
    selection_boost: f64,
    required_selections: usize,
    low_reliability_threshold: f64,
}

impl TryFrom<PolicyParams> for ScoringPolicy {
    type Error = ValidationError;

    fn try_from(params: PolicyParams) -> Result<Self, Self::Error> {
        Self::new(
            params.selection_boost,
            params.required_selections,
            params.low_reliability_threshold,
        )
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            selection_boost: DEFAULT_SELECTION_BOOST,
            required_selections: DEFAULT_REQUIRED_SELECTIONS,
            low_reliability_threshold: DEFAULT_LOW_RELIABILITY_THRESHOLD,
        }
    }
}
