//! Scripted answer source for testing.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use quizrace_core::error::SourceError;
use quizrace_core::model::{Choice, Selection};
use quizrace_core::traits::AnswerSource;

/// One scripted response to a wait.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Deliver `choice` after `after`, measured from the start of the wait.
    Answer { after: Duration, choice: Choice },
    /// Never answer.
    Silence,
    /// Fail as if the input had been closed.
    Fail,
}

/// A mock answer source for exercising sessions without real input.
///
/// Each call to `await_selection` consumes the next step, even if the wait is
/// dropped before the step completes. A dropped delayed answer is therefore
/// lost, which is how a late answer must behave. An exhausted script reports
/// the source as closed.
#[derive(Debug, Default)]
pub struct ScriptedAnswerSource {
    steps: VecDeque<ScriptStep>,
    call_count: u32,
}

impl ScriptedAnswerSource {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps: steps.into(),
            call_count: 0,
        }
    }

    /// Answer with the 0-based `index` after `after`.
    pub fn answer(mut self, after: Duration, index: usize) -> Self {
        self.steps.push_back(ScriptStep::Answer {
            after,
            choice: Choice::Index(index),
        });
        self
    }

    /// Answer with unreadable input after `after`.
    pub fn malformed(mut self, after: Duration, raw: &str) -> Self {
        self.steps.push_back(ScriptStep::Answer {
            after,
            choice: Choice::Malformed(raw.to_string()),
        });
        self
    }

    pub fn silence(mut self) -> Self {
        self.steps.push_back(ScriptStep::Silence);
        self
    }

    pub fn fail(mut self) -> Self {
        self.steps.push_back(ScriptStep::Fail);
        self
    }

    /// Number of waits started so far.
    pub fn call_count(&self) -> u32 {
        self.call_count
    }

    /// Steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

#[async_trait]
impl AnswerSource for ScriptedAnswerSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn await_selection(&mut self) -> Result<Selection, SourceError> {
        self.call_count += 1;
        match self.steps.pop_front() {
            Some(ScriptStep::Answer { after, choice }) => {
                tokio::time::sleep(after).await;
                Ok(Selection::now(choice))
            }
            Some(ScriptStep::Silence) => std::future::pending().await,
            Some(ScriptStep::Fail) | None => Err(SourceError::Closed),
        }
    }
}
