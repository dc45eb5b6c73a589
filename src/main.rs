//! motivation-profile - scores a completed questionnaire read from stdin.
//!
//! Input is a JSON submission:
//!
//! ```json
//! { "answers": [ { "question_id": 1, "choice": "a" }, { "question_id": 40, "choice": ["Learning", "Purpose"] } ] }
//! ```
//!
//! The ranked profile is written to stdout as pretty JSON. Logs go to stderr.

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use motivation_profile::adapters::{InMemoryLedgerRepository, TracingEventPublisher};
use motivation_profile::application::{
    RecordAnswerCommand, RecordAnswerHandler, StartAssessmentCommand, StartAssessmentHandler,
    SubmitAssessmentCommand, SubmitAssessmentHandler,
};
use motivation_profile::config::{AppConfig, ConfigError, LoggingConfig};
use motivation_profile::domain::assessment::{Answer, AssessmentError, Profile, ProfileScorer};

#[derive(Debug, Deserialize)]
struct Submission {
    answers: Vec<Answer>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("Failed to read submission: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid submission: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(config: AppConfig) -> Result<Profile, CliError> {
    let bank = config.bank.load_bank()?;
    let policy = config.scoring.to_policy().map_err(ConfigError::from)?;
    let scorer = Arc::new(ProfileScorer::new(bank, policy)?);

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let submission: Submission = serde_json::from_str(&input)?;

    let repository = Arc::new(InMemoryLedgerRepository::new());
    let publisher = Arc::new(TracingEventPublisher::new());

    let started = StartAssessmentHandler::new(scorer.clone(), repository.clone())
        .handle(StartAssessmentCommand {
            reveal_groups: config.bank.reveal_groups,
        })
        .await?;

    let recorder = RecordAnswerHandler::new(repository.clone());
    for answer in submission.answers {
        recorder
            .handle(RecordAnswerCommand {
                session_id: started.session_id,
                answer,
            })
            .await?;
    }

    let submitted = SubmitAssessmentHandler::new(scorer, repository, publisher)
        .handle(SubmitAssessmentCommand {
            session_id: started.session_id,
            correlation_id: None,
        })
        .await?;

    Ok(submitted.profile)
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    if let Err(err) = config.validate() {
        error!(error = %err, "Invalid configuration");
        return ExitCode::FAILURE;
    }

    let profile = match run(config).await {
        Ok(profile) => profile,
        Err(err) => {
            error!(error = %err, "Scoring failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&profile) {
        Ok(json) => {
            println!("{}", json);
            info!(factors = profile.entries().len(), "Profile written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Failed to serialize profile");
            ExitCode::FAILURE
        }
    }
}
