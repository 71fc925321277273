//! Error types for quiz sessions.
//!
//! Per-question results (wrong answers, timeouts) are never errors; they are
//! recorded as [`Outcome`](crate::model::Outcome)s. The types here cover the
//! conditions that stop a session from starting or from continuing.

use std::time::Duration;

use thiserror::Error;

use crate::report::QuizReport;

/// A quiz or session configuration that cannot be run.
///
/// Always raised before the first question is presented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The quiz has no questions.
    #[error("quiz has no questions")]
    EmptyQuiz,

    /// The time limit is zero.
    #[error("time limit must be positive, got {0:?}")]
    NonPositiveTimeLimit(Duration),

    /// A question offers fewer than two options.
    #[error("question needs at least 2 options, got {found}")]
    TooFewOptions { found: usize },

    /// The correct index does not point at an option.
    #[error("correct index {index} is out of range for {options} options")]
    CorrectIndexOutOfRange { index: usize, options: usize },
}

/// Failures of an [`AnswerSource`](crate::traits::AnswerSource).
///
/// Any of these means no further input is possible.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The input stream reached its end.
    #[error("answer source closed")]
    Closed,

    /// Reading from the underlying input failed.
    #[error("failed to read answer: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that stop a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The session was rejected before any question ran.
    #[error("invalid quiz configuration: {0}")]
    Config(#[from] ConfigError),

    /// The answer source failed mid-session. Carries the questions resolved
    /// before the failure.
    #[error(
        "answer source failed after {} of {} questions: {cause}",
        .partial.entries.len(),
        .partial.total
    )]
    InputSourceFailure {
        cause: SourceError,
        partial: Box<QuizReport>,
    },
}

impl QuizError {
    /// Returns the partial report if the session was aborted mid-way.
    pub fn partial_report(&self) -> Option<&QuizReport> {
        match self {
            QuizError::InputSourceFailure { partial, .. } => Some(partial.as_ref()),
            QuizError::Config(_) => None,
        }
    }

    /// Returns `true` if this error ended a session that had already started.
    pub fn is_fatal_input_failure(&self) -> bool {
        matches!(self, QuizError::InputSourceFailure { .. })
    }
}
