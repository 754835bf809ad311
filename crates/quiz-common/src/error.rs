/// Error types shared by the quiz summary core.
///
/// Tallying and resolving are total over well-formed input, so the only failures
/// here are precondition violations and malformed quiz definitions. Reporter
/// failures live in [`crate::reporter::ReportError`] and never propagate to callers.

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("answer count {answers} does not match question count {questions}")]
    LengthMismatch { answers: usize, questions: usize },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid quiz definition: {0}")]
    Definition(String),
}
