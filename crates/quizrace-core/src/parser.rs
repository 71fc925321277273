//! TOML quiz file parser.
//!
//! Loads quizzes from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, Quiz};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    time_limit_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    time_limit_secs: Option<u64>,
}

/// Parse a single TOML file into a `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let time_limit = parsed.quiz.time_limit_secs.map(Duration::from_secs);
    if time_limit.is_some_and(|t| t.is_zero()) {
        anyhow::bail!(
            "{}: quiz time_limit_secs must be positive",
            source_path.display()
        );
    }

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let question = Question::new(q.prompt, q.options, q.correct_index)
                .with_context(|| format!("question {} is invalid", i + 1))?;
            match q.time_limit_secs {
                Some(secs) => question
                    .with_time_limit(Duration::from_secs(secs))
                    .with_context(|| format!("question {} is invalid", i + 1)),
                None => Ok(question),
            }
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("in quiz file: {}", source_path.display()))?;

    Ok(Quiz {
        id: parsed.quiz.id,
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        questions,
        time_limit,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Shortest per-question limit that doesn't trigger a warning.
const MIN_COMFORTABLE_LIMIT: Duration = Duration::from_secs(3);

/// Validate a quiz for common issues.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "quiz has no questions".into(),
        });
    }

    // Check for duplicate prompts
    let mut seen_prompts = HashSet::new();
    for (i, q) in quiz.questions.iter().enumerate() {
        if !seen_prompts.insert(q.prompt().trim()) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: format!("duplicate prompt: {}", q.prompt().trim()),
            });
        }
    }

    for (i, q) in quiz.questions.iter().enumerate() {
        if q.prompt().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "prompt is empty".into(),
            });
        }

        if q.options().iter().any(|o| o.trim().is_empty()) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "has a blank option".into(),
            });
        }

        let mut seen_options = HashSet::new();
        if q.options().iter().any(|o| !seen_options.insert(o.trim())) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "has duplicate options".into(),
            });
        }

        if let Some(limit) = q.time_limit().or(quiz.time_limit) {
            if limit < MIN_COMFORTABLE_LIMIT {
                warnings.push(ValidationWarning {
                    question: Some(i + 1),
                    message: format!("time limit of {}s is very short", limit.as_secs()),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
id = "planets"
name = "Planets"
description = "A short astronomy quiz"
time_limit_secs = 15

[[questions]]
prompt = "Which planet is known as the Red Planet?"
options = ["Earth", "Mars", "Venus", "Jupiter"]
correct_index = 1

[[questions]]
prompt = "Which planet is the largest?"
options = ["Saturn", "Jupiter", "Neptune"]
correct_index = 1
time_limit_secs = 5
"#;

    #[test]
    fn parse_valid_toml() {
        let quiz = parse_quiz_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(quiz.id, "planets");
        assert_eq!(quiz.name, "Planets");
        assert_eq!(quiz.time_limit, Some(Duration::from_secs(15)));
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].correct_index(), 1);
        assert_eq!(quiz.questions[0].time_limit(), None);
        assert_eq!(
            quiz.questions[1].time_limit(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[quiz]
id = "minimal"
name = "Minimal"

[[questions]]
prompt = "Yes or no?"
options = ["Yes", "No"]
correct_index = 0
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert!(quiz.description.is_empty());
        assert!(quiz.time_limit.is_none());
        assert!(validate_quiz(&quiz).is_empty());
    }

    #[test]
    fn parse_rejects_out_of_range_answer() {
        let toml = r#"
[quiz]
id = "bad"
name = "Bad"

[[questions]]
prompt = "Pick one"
options = ["A", "B"]
correct_index = 2
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("question 1 is invalid"), "got: {msg}");
        assert!(msg.contains("out of range"), "got: {msg}");
    }

    #[test]
    fn parse_rejects_zero_time_limit() {
        let toml = r#"
[quiz]
id = "zero"
name = "Zero"
time_limit_secs = 0
"#;
        assert!(parse_quiz_str(toml, &PathBuf::from("zero.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_quiz_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_common_issues() {
        let toml = r#"
[quiz]
id = "issues"
name = "Issues"

[[questions]]
prompt = "Same?"
options = ["A", "A", " "]
correct_index = 0
time_limit_secs = 1

[[questions]]
prompt = "Same?"
options = ["A", "B"]
correct_index = 1
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("issues.toml")).unwrap();
        let warnings = validate_quiz(&quiz);
        let messages: Vec<_> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("duplicate prompt")));
        assert!(messages.iter().any(|m| m.contains("duplicate options")));
        assert!(messages.iter().any(|m| m.contains("blank option")));
        assert!(messages.iter().any(|m| m.contains("very short")));
        assert!(warnings
            .iter()
            .filter(|w| w.message.contains("duplicate prompt"))
            .all(|w| w.question == Some(2)));
    }

    #[test]
    fn validate_empty_quiz() {
        let toml = "[quiz]\nid = \"empty\"\nname = \"Empty\"\n";
        let quiz = parse_quiz_str(toml, &PathBuf::from("empty.toml")).unwrap();
        let warnings = validate_quiz(&quiz);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].question.is_none());
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let quizzes = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].id, "planets");
    }
}
