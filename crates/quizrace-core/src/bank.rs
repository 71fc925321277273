//! Built-in question bank.

use std::path::Path;

use anyhow::Result;

use crate::model::Quiz;
use crate::parser::parse_quiz_str;

/// The general-knowledge quiz used when no quiz file is given.
pub const GENERAL_KNOWLEDGE_TOML: &str = r#"[quiz]
id = "general"
name = "General Knowledge"
description = "Five quick questions to get started"

[[questions]]
prompt = "What is the capital of France?"
options = ["Berlin", "Madrid", "Paris", "Rome"]
correct_index = 2

[[questions]]
prompt = "Which planet is known as the Red Planet?"
options = ["Earth", "Mars", "Venus", "Jupiter"]
correct_index = 1

[[questions]]
prompt = "Who wrote 'Hamlet'?"
options = ["Charles Dickens", "J.K. Rowling", "William Shakespeare", "Mark Twain"]
correct_index = 2

[[questions]]
prompt = "What is the largest ocean on Earth?"
options = ["Atlantic Ocean", "Indian Ocean", "Arctic Ocean", "Pacific Ocean"]
correct_index = 3

[[questions]]
prompt = "What is the chemical symbol for water?"
options = ["O2", "CO2", "H2O", "N2"]
correct_index = 2
"#;

/// Load the built-in general-knowledge quiz.
pub fn general_knowledge() -> Result<Quiz> {
    parse_quiz_str(GENERAL_KNOWLEDGE_TOML, Path::new("<built-in>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::validate_quiz;

    #[test]
    fn builtin_quiz_is_valid() {
        let quiz = general_knowledge().unwrap();
        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.questions[0].correct_index(), 2);
        assert_eq!(quiz.questions[3].options()[3], "Pacific Ocean");
        assert!(validate_quiz(&quiz).is_empty());
    }
}
