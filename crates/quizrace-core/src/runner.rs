//! Race between the respondent and the clock for a single question.

use std::time::Duration;

use tokio::time::Instant;

use crate::clock::Clock;
use crate::error::SourceError;
use crate::model::{Outcome, Question, Selection};
use crate::traits::AnswerSource;

/// Default time budget per question.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

/// Which side of the race committed the outcome.
#[derive(Debug)]
enum Verdict {
    Answered(Selection),
    Expired,
    SourceFailed(SourceError),
}

/// Resolves one question at a time against an answer source and a clock.
pub struct QuestionRunner<'a> {
    source: &'a mut dyn AnswerSource,
    clock: &'a dyn Clock,
}

impl<'a> QuestionRunner<'a> {
    pub fn new(source: &'a mut dyn AnswerSource, clock: &'a dyn Clock) -> Self {
        Self { source, clock }
    }

    /// Race the answer source against `time_limit` and classify the result.
    ///
    /// Consumes at most one selection. The only error is a failed answer
    /// source, which the caller should treat as fatal.
    pub async fn run(
        &mut self,
        question: &Question,
        time_limit: Duration,
    ) -> Result<Outcome, SourceError> {
        let mut timer = self.clock.after(time_limit);
        let deadline = timer.deadline();

        // The single decision point: exactly one arm runs, and the losing
        // future is dropped before this statement completes.
        let verdict = tokio::select! {
            biased;
            answer = self.source.await_selection() => match answer {
                Ok(selection) => Verdict::Answered(selection),
                Err(e) => Verdict::SourceFailed(e),
            },
            _ = timer.expired() => Verdict::Expired,
        };
        timer.cancel();

        match resolve(verdict, deadline) {
            Ok(Some(selection)) => {
                let outcome = question.classify(selection.choice);
                tracing::debug!(?outcome, "question answered before deadline");
                Ok(outcome)
            }
            Ok(None) => {
                tracing::debug!(?time_limit, "question timed out");
                Ok(Outcome::TimedOut)
            }
            Err(e) => {
                tracing::warn!("answer source '{}' failed: {e}", self.source.name());
                Err(e)
            }
        }
    }
}

/// Apply the tie-break: a selection counts only if it was fully received
/// strictly before the deadline.
fn resolve(verdict: Verdict, deadline: Instant) -> Result<Option<Selection>, SourceError> {
    match verdict {
        Verdict::Answered(selection) if selection.received_at < deadline => Ok(Some(selection)),
        Verdict::Answered(selection) => {
            tracing::debug!(
                late_by = ?selection.received_at.saturating_duration_since(deadline),
                "selection arrived at or after the deadline; discarding"
            );
            Ok(None)
        }
        Verdict::Expired => Ok(None),
        Verdict::SourceFailed(e) => Err(e),
    }
}
