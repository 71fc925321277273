//! Collaborator traits at the edges of a quiz session.
//!
//! The core never reads input or writes output itself. Answers come from an
//! [`AnswerSource`], and everything the respondent sees goes through a
//! [`Presenter`].

use std::time::Duration;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::{Outcome, Question, Selection};
use crate::report::QuizReport;

// ---------------------------------------------------------------------------
// Answer source
// ---------------------------------------------------------------------------

/// Provider of the respondent's selections.
///
/// Cancellation is by drop: the runner drops the future returned by
/// [`await_selection`](AnswerSource::await_selection) when the timer wins.
/// Implementations must not hand a selection received for a dropped wait to
/// any later call.
#[async_trait]
pub trait AnswerSource: Send {
    /// Human-readable source name (e.g. "stdin").
    fn name(&self) -> &str;

    /// Wait for the next selection.
    ///
    /// An `Err` means no further input is possible.
    async fn await_selection(&mut self) -> Result<Selection, SourceError>;
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Sink for everything shown to the respondent. Calls are fire-and-forget.
pub trait Presenter: Send + Sync {
    /// A question is about to be raced. `number` is 1-based.
    fn on_question(&self, number: usize, total: usize, question: &Question, time_limit: Duration);
    /// A question was resolved.
    fn on_outcome(&self, number: usize, question: &Question, outcome: &Outcome);
    /// Every question was resolved.
    fn on_quiz_complete(&self, report: &QuizReport);
    /// The session stopped early on a fatal input failure.
    fn on_quiz_aborted(&self, partial: &QuizReport, cause: &SourceError);
}

/// Presenter that shows nothing.
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn on_question(&self, _: usize, _: usize, _: &Question, _: Duration) {}
    fn on_outcome(&self, _: usize, _: &Question, _: &Outcome) {}
    fn on_quiz_complete(&self, _: &QuizReport) {}
    fn on_quiz_aborted(&self, _: &QuizReport, _: &SourceError) {}
}
