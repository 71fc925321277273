//! Core data model types for quizrace.
//!
//! Questions are immutable once built; outcomes and summary entries are the
//! values a session accumulates as it goes.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::ConfigError;

/// A single multiple-choice question.
///
/// The correct index is checked at construction, so every `Question` in
/// circulation points at a real option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    time_limit: Option<Duration>,
}

impl Question {
    /// Build a question, rejecting fewer than two options or an out-of-range
    /// correct index.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, ConfigError> {
        if options.len() < 2 {
            return Err(ConfigError::TooFewOptions {
                found: options.len(),
            });
        }
        if correct_index >= options.len() {
            return Err(ConfigError::CorrectIndexOutOfRange {
                index: correct_index,
                options: options.len(),
            });
        }
        Ok(Self {
            prompt: prompt.into(),
            options,
            correct_index,
            time_limit: None,
        })
    }

    /// Override the session time limit for this question only.
    pub fn with_time_limit(mut self, limit: Duration) -> Result<Self, ConfigError> {
        if limit.is_zero() {
            return Err(ConfigError::NonPositiveTimeLimit(limit));
        }
        self.time_limit = Some(limit);
        Ok(self)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Per-question time limit override, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Classify a respondent's choice against this question.
    pub fn classify(&self, choice: Choice) -> Outcome {
        match choice {
            Choice::Index(index) if index == self.correct_index => Outcome::Correct,
            other => Outcome::Incorrect { choice: other },
        }
    }
}

/// A named, ordered list of questions.
#[derive(Debug, Clone)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this quiz.
    pub description: String,
    /// Questions in presentation order.
    pub questions: Vec<Question>,
    /// Default time limit for questions that don't override it.
    pub time_limit: Option<Duration>,
}

/// What the respondent entered for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// A zero-based option index. May be out of range for the question.
    Index(usize),
    /// Input that could not be read as an option number.
    Malformed(String),
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Index(index) => write!(f, "option {}", index + 1),
            Choice::Malformed(raw) => write!(f, "'{raw}'"),
        }
    }
}

/// A choice together with the instant it was fully received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub choice: Choice,
    pub received_at: Instant,
}

impl Selection {
    /// A selection received right now.
    pub fn now(choice: Choice) -> Self {
        Self {
            choice,
            received_at: Instant::now(),
        }
    }
}

/// Terminal classification of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect { choice: Choice },
    TimedOut,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Correct => write!(f, "Correct"),
            Outcome::Incorrect { .. } => write!(f, "Incorrect"),
            Outcome::TimedOut => write!(f, "Not answered (Time's up)"),
        }
    }
}

/// One line of the session summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Zero-based position of the question in the quiz.
    pub question_index: usize,
    /// The question prompt, copied for rendering.
    pub prompt: String,
    pub outcome: Outcome,
    /// Time from the start of the race to its resolution.
    pub elapsed_ms: u64,
}
