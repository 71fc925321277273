//! quizrace-core — Timed question runner, quiz sessions and reports.
//!
//! This crate defines the quiz data model, the collaborator traits, and the
//! race between an answer source and a per-question timer that the rest of
//! quizrace builds on.

pub mod bank;
pub mod clock;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod runner;
pub mod session;
pub mod traits;

pub use error::{ConfigError, QuizError, SourceError};
pub use model::{Choice, Outcome, Question, Quiz, Selection, SummaryEntry};
pub use report::QuizReport;
pub use runner::{QuestionRunner, DEFAULT_TIME_LIMIT};
pub use session::{QuizSession, SessionConfig};
