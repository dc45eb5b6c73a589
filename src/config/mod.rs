//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `MOTIVATION_PROFILE`
//! prefix and nested values are separated by double underscores. Every
//! section has defaults, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use motivation_profile::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let policy = config.scoring.to_policy().expect("Invalid scoring policy");
//! println!("Selection boost: {}", policy.selection_boost());
//! ```

mod bank;
mod error;
mod logging;
mod scoring;

pub use bank::BankConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use scoring::ScoringConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Scoring policy knobs
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Question bank source
    #[serde(default)]
    pub bank: BankConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MOTIVATION_PROFILE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MOTIVATION_PROFILE__SCORING__SELECTION_BOOST=0.25` -> `scoring.selection_boost = 0.25`
    /// - `MOTIVATION_PROFILE__BANK__PATH=bank.yaml` -> `bank.path = "bank.yaml"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MOTIVATION_PROFILE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring.validate()?;
        self.bank.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
