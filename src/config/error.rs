//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid scoring policy: {0}")]
    InvalidScoring(String),

    #[error("Question bank file not found: {}", .0.display())]
    BankFileMissing(PathBuf),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
