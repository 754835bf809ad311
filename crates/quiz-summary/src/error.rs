use quiz_common::error::QuizError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read quiz definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("no summary to show: submit answers first")]
    NoSummary,
}
