//! quizrace configuration and answer-source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizrace_core::traits::AnswerSource;

use crate::line::LineAnswerSource;

/// Where answers come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// The process's standard input.
    #[default]
    Stdin,
    /// A file with one answer per line.
    File { path: String },
}

/// Top-level quizrace configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizraceConfig {
    /// Default seconds allowed per question.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Answer source.
    #[serde(default)]
    pub source: SourceConfig,
    /// Print a per-question table after the quiz.
    #[serde(default = "default_true")]
    pub show_summary_table: bool,
}

fn default_time_limit() -> u64 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for QuizraceConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: default_time_limit(),
            source: SourceConfig::default(),
            show_summary_table: true,
        }
    }
}

impl QuizraceConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizrace.toml` in the current directory
/// 2. `~/.config/quizrace/config.toml`
///
/// Environment variable override: `QUIZRACE_TIME_LIMIT_SECS`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizraceConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizrace.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(&path)?
        }
        None => QuizraceConfig::default(),
    };

    if let Ok(value) = std::env::var("QUIZRACE_TIME_LIMIT_SECS") {
        config.time_limit_secs = value
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZRACE_TIME_LIMIT_SECS: '{value}'"))?;
    }

    if let SourceConfig::File { path } = &mut config.source {
        *path = resolve_env_vars(path);
    }

    anyhow::ensure!(
        config.time_limit_secs > 0,
        "time_limit_secs must be positive"
    );

    Ok(config)
}

fn parse_config(path: &Path) -> Result<QuizraceConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<QuizraceConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrace"))
}

/// Create an answer source from its configuration.
///
/// Must be called from within a tokio runtime.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn AnswerSource>> {
    match config {
        SourceConfig::Stdin => Ok(Box::new(LineAnswerSource::stdin())),
        SourceConfig::File { path } => Ok(Box::new(LineAnswerSource::from_file(Path::new(
            path,
        ))?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZRACE_TEST_VAR", "answers");
        assert_eq!(resolve_env_vars("${_QUIZRACE_TEST_VAR}"), "answers");
        assert_eq!(
            resolve_env_vars("/tmp/${_QUIZRACE_TEST_VAR}.txt"),
            "/tmp/answers.txt"
        );
        std::env::remove_var("_QUIZRACE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizraceConfig::default();
        assert_eq!(config.time_limit(), Duration::from_secs(10));
        assert_eq!(config.source, SourceConfig::Stdin);
        assert!(config.show_summary_table);
    }

    #[test]
    fn parse_source_config() {
        let toml_str = r#"
time_limit_secs = 20
show_summary_table = false

[source]
type = "file"
path = "answers.txt"
"#;
        let config: QuizraceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.time_limit_secs, 20);
        assert!(!config.show_summary_table);
        assert_eq!(
            config.source,
            SourceConfig::File {
                path: "answers.txt".into()
            }
        );
    }

    #[test]
    fn explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizrace.toml");
        std::fs::write(&path, "time_limit_secs = 7\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.source, SourceConfig::Stdin);
        assert_eq!(config.time_limit_secs, 7);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizrace.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[tokio::test]
    async fn create_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.txt");
        std::fs::write(&path, "1\n").unwrap();

        let source = create_source(&SourceConfig::File {
            path: path.display().to_string(),
        })
        .unwrap();
        assert!(source.name().starts_with("file:"));
        assert!(create_source(&SourceConfig::File {
            path: "/nonexistent/answers.txt".into()
        })
        .is_err());
    }
}
