use std::path::{Path, PathBuf};

use quiz_common::reporter::ScoringClientConfig;

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the quiz questions.
    pub questions_path: PathBuf,
    /// Scoring endpoint settings. `None` disables result reporting.
    pub scoring: Option<ScoringClientConfig>,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Required:
    /// - `QUIZ_QUESTIONS_PATH`: path to the quiz definition JSON
    ///
    /// Optional:
    /// - `SCORING_URL`, `SCORING_TIMEOUT_SECS`, `SCORING_MAX_ERROR_BODY_BYTES`
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        let questions_path = std::env::var("QUIZ_QUESTIONS_PATH").map_err(|_| {
            AppError::Config("QUIZ_QUESTIONS_PATH environment variable is required".to_string())
        })?;

        let questions_path = Path::new(&questions_path).to_path_buf();
        if !questions_path.is_file() {
            return Err(AppError::Config(format!(
                "quiz definition not found at {}",
                questions_path.display()
            )));
        }

        Ok(Self {
            questions_path,
            scoring: ScoringClientConfig::from_env(),
            tcp_listen_addr: std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        })
    }
}
