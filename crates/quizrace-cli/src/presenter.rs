//! Console presenter.

use std::io::Write;
use std::time::Duration;

use quizrace_core::error::SourceError;
use quizrace_core::model::{Outcome, Question};
use quizrace_core::report::QuizReport;
use quizrace_core::traits::Presenter;

/// Prints questions and feedback line by line.
///
/// With `to_stderr` set, stdout is left free for a machine-readable report.
pub struct ConsolePresenter {
    to_stderr: bool,
}

impl ConsolePresenter {
    pub fn new(to_stderr: bool) -> Self {
        Self { to_stderr }
    }

    fn emit(&self, text: &str) {
        // Write failures are ignored; presentation never blocks the quiz.
        if self.to_stderr {
            let mut err = std::io::stderr().lock();
            let _ = err.write_all(text.as_bytes());
            let _ = err.flush();
        } else {
            let mut out = std::io::stdout().lock();
            let _ = out.write_all(text.as_bytes());
            let _ = out.flush();
        }
    }

    fn results_block(report: &QuizReport) -> String {
        let mut text = String::from("\n===== Quiz Results =====\n");
        text.push_str(&format!("Final Score: {}/{}\n", report.score, report.total));
        text.push_str("\nSummary of your answers:\n");
        for line in report.summary_lines() {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

impl Presenter for ConsolePresenter {
    fn on_question(&self, number: usize, total: usize, question: &Question, time_limit: Duration) {
        let mut text = format!("\nQuestion {number}/{total}: {}\n", question.prompt());
        for (i, option) in question.options().iter().enumerate() {
            text.push_str(&format!("  {}. {option}\n", i + 1));
        }
        text.push_str(&format!(
            "Your answer (1-{}, {}s): ",
            question.options().len(),
            time_limit.as_secs()
        ));
        self.emit(&text);
    }

    fn on_outcome(&self, _number: usize, question: &Question, outcome: &Outcome) {
        let text = match outcome {
            Outcome::Correct => "Correct!\n".to_string(),
            Outcome::Incorrect { .. } => format!(
                "Incorrect. The answer was {}. {}\n",
                question.correct_index() + 1,
                question.options()[question.correct_index()]
            ),
            Outcome::TimedOut => "\nTime's up! Moving to the next question.\n".to_string(),
        };
        self.emit(&text);
    }

    fn on_quiz_complete(&self, report: &QuizReport) {
        self.emit(&Self::results_block(report));
    }

    fn on_quiz_aborted(&self, partial: &QuizReport, cause: &SourceError) {
        let mut text = format!(
            "\n\nQuiz aborted: {cause}. Answered {} of {} questions.\n",
            partial.entries.len(),
            partial.total
        );
        if !partial.entries.is_empty() {
            text.push_str(&Self::results_block(partial));
        }
        self.emit(&text);
    }
}
