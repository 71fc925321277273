//! Quiz session: runs every question in order and aggregates the report.

use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{ConfigError, QuizError};
use crate::model::{Outcome, Question, Quiz, SummaryEntry};
use crate::report::QuizReport;
use crate::runner::{QuestionRunner, DEFAULT_TIME_LIMIT};
use crate::traits::{AnswerSource, Presenter};

/// Configuration for a quiz session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Time budget for questions without their own override.
    pub time_limit: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

/// One pass through a quiz.
///
/// Created validated; consumed by [`run`](QuizSession::run), so its score and
/// summary never outlive the report they produce.
pub struct QuizSession {
    quiz: Quiz,
    config: SessionConfig,
}

impl QuizSession {
    /// Validate the quiz and configuration before any question runs.
    pub fn new(quiz: Quiz, config: SessionConfig) -> Result<Self, ConfigError> {
        if quiz.questions.is_empty() {
            return Err(ConfigError::EmptyQuiz);
        }
        for limit in [Some(config.time_limit), quiz.time_limit].into_iter().flatten() {
            if limit.is_zero() {
                return Err(ConfigError::NonPositiveTimeLimit(limit));
            }
        }
        Ok(Self { quiz, config })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Effective time limit for a question: its own override, then the
    /// quiz default, then the session default.
    pub fn time_limit_for(&self, question: &Question) -> Duration {
        question
            .time_limit()
            .or(self.quiz.time_limit)
            .unwrap_or(self.config.time_limit)
    }

    /// Run every question in order.
    ///
    /// Each race is fully resolved, and its timer cancelled, before the next
    /// question is presented. A failing answer source stops the session and
    /// is returned with the partial report.
    pub async fn run(
        self,
        source: &mut dyn AnswerSource,
        clock: &dyn Clock,
        presenter: &dyn Presenter,
    ) -> Result<QuizReport, QuizError> {
        let start = Instant::now();
        let total = self.quiz.questions.len();
        let mut report = QuizReport {
            id: Uuid::new_v4(),
            quiz_name: self.quiz.name.clone(),
            started_at: chrono::Utc::now(),
            score: 0,
            total,
            entries: Vec::with_capacity(total),
            duration_ms: 0,
        };

        tracing::info!(
            quiz = %self.quiz.name,
            questions = total,
            source = source.name(),
            "starting quiz session"
        );

        let mut runner = QuestionRunner::new(source, clock);

        for (index, question) in self.quiz.questions.iter().enumerate() {
            let number = index + 1;
            let time_limit = self.time_limit_for(question);
            presenter.on_question(number, total, question, time_limit);

            let asked_at = Instant::now();
            let outcome = match runner.run(question, time_limit).await {
                Ok(outcome) => outcome,
                Err(cause) => {
                    report.duration_ms = start.elapsed().as_millis() as u64;
                    tracing::error!("quiz aborted at question {number}/{total}: {cause}");
                    presenter.on_quiz_aborted(&report, &cause);
                    return Err(QuizError::InputSourceFailure {
                        cause,
                        partial: Box::new(report),
                    });
                }
            };

            if outcome == Outcome::Correct {
                report.score += 1;
            }
            presenter.on_outcome(number, question, &outcome);
            report.entries.push(SummaryEntry {
                question_index: index,
                prompt: question.prompt().to_string(),
                outcome,
                elapsed_ms: asked_at.elapsed().as_millis() as u64,
            });
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            score = report.score,
            total,
            duration_ms = report.duration_ms,
            "quiz session complete"
        );
        presenter.on_quiz_complete(&report);
        Ok(report)
    }
}
