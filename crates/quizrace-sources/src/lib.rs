//! quizrace-sources — Answer sources and configuration.
//!
//! Implements the `AnswerSource` trait for line-based input (stdin or an
//! answers file) and a scripted mock, and loads `quizrace.toml`.

pub mod config;
pub mod line;
pub mod mock;

pub use config::{create_source, load_config_from, QuizraceConfig, SourceConfig};
pub use line::LineAnswerSource;
pub use mock::{ScriptStep, ScriptedAnswerSource};
