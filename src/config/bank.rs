//! Question bank configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::ValidationError;
use crate::domain::assessment::{AssessmentError, QuestionBank};

/// Where the question bank comes from and how it is presented
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BankConfig {
    /// YAML or JSON bank file; the built-in reference bank when unset
    pub path: Option<PathBuf>,

    /// Show each option's factor group to the test-taker
    #[serde(default)]
    pub reveal_groups: bool,
}

impl BankConfig {
    /// Load the configured bank
    pub fn load_bank(&self) -> Result<Arc<QuestionBank>, AssessmentError> {
        match &self.path {
            Some(path) => QuestionBank::from_path(path).map(Arc::new),
            None => QuestionBank::reference(),
        }
    }

    /// Validate bank configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.path {
            if !path.is_file() {
                return Err(ValidationError::BankFileMissing(path.clone()));
            }
        }
        Ok(())
    }
}
