//! Quiz report types and rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Outcome, SummaryEntry};

/// The result of one quiz session.
///
/// A completed report has one entry per question. A report attached to an
/// aborted session holds only the questions resolved before the abort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// Name of the quiz that was run.
    pub quiz_name: String,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Number of correct answers.
    pub score: usize,
    /// Number of questions in the quiz.
    pub total: usize,
    /// One entry per resolved question, in question order.
    pub entries: Vec<SummaryEntry>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl QuizReport {
    /// Returns `true` if every question was resolved.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.total
    }

    pub fn incorrect_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Incorrect { .. }))
    }

    pub fn timed_out_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::TimedOut))
    }

    /// Score as a fraction of the quiz size, in `[0.0, 1.0]`.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    /// One human-readable line per answered question.
    pub fn summary_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| match &e.outcome {
                Outcome::TimedOut => {
                    format!("Question {}: {}", e.question_index + 1, e.outcome)
                }
                _ => format!(
                    "Question {}: {} | Your answer: {}",
                    e.question_index + 1,
                    e.prompt,
                    e.outcome
                ),
            })
            .collect()
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.quiz_name));
        md.push_str(&format!(
            "**Score:** {}/{} ({:.1}%)",
            self.score,
            self.total,
            self.percentage() * 100.0
        ));
        if !self.is_complete() {
            md.push_str(&format!(
                " (aborted after {} question(s))",
                self.entries.len()
            ));
        }
        md.push_str("\n\n");

        md.push_str("| # | Question | Result | Time |\n");
        md.push_str("|---|----------|--------|------|\n");
        for e in &self.entries {
            let result = match &e.outcome {
                Outcome::Incorrect { choice } => format!("Incorrect ({choice})"),
                other => other.to_string(),
            };
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}s |\n",
                e.question_index + 1,
                e.prompt.replace('|', "\\|"),
                result,
                e.duration_secs()
            ));
        }

        md
    }
}

impl SummaryEntry {
    fn duration_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}
