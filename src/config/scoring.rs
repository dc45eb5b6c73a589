//! Scoring configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::assessment::{
    ScoringPolicy, DEFAULT_LOW_RELIABILITY_THRESHOLD, DEFAULT_REQUIRED_SELECTIONS,
    DEFAULT_SELECTION_BOOST,
};

/// Scoring configuration, mirrored into a [`ScoringPolicy`]
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Boost added to each self-reported factor
    #[serde(default = "default_selection_boost")]
    pub selection_boost: f64,

    /// Number of factors the multi-select answer must name
    #[serde(default = "default_required_selections")]
    pub required_selections: usize,

    /// Consistency ratios below this are flagged
    #[serde(default = "default_low_reliability_threshold")]
    pub low_reliability_threshold: f64,
}

impl ScoringConfig {
    /// Build the domain policy from these values
    pub fn to_policy(&self) -> Result<ScoringPolicy, ValidationError> {
        ScoringPolicy::new(
            self.selection_boost,
            self.required_selections,
            self.low_reliability_threshold,
        )
        .map_err(|e| ValidationError::InvalidScoring(e.to_string()))
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_policy().map(|_| ())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            selection_boost: default_selection_boost(),
            required_selections: default_required_selections(),
            low_reliability_threshold: default_low_reliability_threshold(),
        }
    }
}

fn default_selection_boost() -> f64 {
    DEFAULT_SELECTION_BOOST
}

fn default_required_selections() -> usize {
    DEFAULT_REQUIRED_SELECTIONS
}

fn default_low_reliability_threshold() -> f64 {
    DEFAULT_LOW_RELIABILITY_THRESHOLD
}
