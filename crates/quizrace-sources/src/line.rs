//! Line-oriented answer source for stdin and answer files.
//!
//! A background reader timestamps every line as it arrives. Answers are typed
//! as 1-based option numbers and handed to the core as 0-based indices.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use quizrace_core::error::SourceError;
use quizrace_core::model::{Choice, Selection};
use quizrace_core::traits::AnswerSource;

/// What the reader saw on the input.
#[derive(Debug)]
enum LineEvent {
    Line { text: String, at: Instant },
    Failed(io::Error),
}

/// Answer source fed by lines of text.
///
/// When a wait is abandoned (the question timed out), anything that arrives
/// before the next wait begins is stale and gets discarded. Lines that were
/// already buffered before the abandonment are kept, so piped or file input
/// can answer ahead.
pub struct LineAnswerSource {
    name: String,
    lines: mpsc::UnboundedReceiver<LineEvent>,
    backlog: VecDeque<LineEvent>,
    abandoned_at: Option<Instant>,
    reader: Option<JoinHandle<()>>,
}

impl LineAnswerSource {
    /// Read answers from an async reader on a tokio task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<R>(name: impl Into<String>, reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(read_async_lines(reader, tx));
        Self::with_channel(name.into(), rx, Some(task))
    }

    /// Read answers from the process's standard input.
    ///
    /// Uses a detached OS thread, since a blocking stdin read cannot be
    /// cancelled and would otherwise hold up runtime shutdown.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let event = match line {
                    Ok(text) => LineEvent::Line {
                        text,
                        at: Instant::now(),
                    },
                    Err(e) => LineEvent::Failed(e),
                };
                let failed = matches!(event, LineEvent::Failed(_));
                if tx.send(event).is_err() || failed {
                    break;
                }
            }
        });
        Self::with_channel("stdin".into(), rx, None)
    }

    /// Read answers from a file, one per line.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open answers file: {}", path.display()))?;
        let file = tokio::fs::File::from_std(file);
        Ok(Self::new(
            format!("file:{}", path.display()),
            BufReader::new(file),
        ))
    }

    fn with_channel(
        name: String,
        lines: mpsc::UnboundedReceiver<LineEvent>,
        reader: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            name,
            lines,
            backlog: VecDeque::new(),
            abandoned_at: None,
            reader,
        }
    }

    /// Move everything already received into the backlog, dropping lines
    /// that arrived after the last abandoned wait.
    fn collect_backlog(&mut self) {
        while let Ok(event) = self.lines.try_recv() {
            self.backlog.push_back(event);
        }
        if let Some(since) = self.abandoned_at.take() {
            self.backlog.retain(|event| match event {
                LineEvent::Line { text, at } if *at >= since => {
                    tracing::warn!("discarding late input {text:?}");
                    false
                }
                _ => true,
            });
        }
    }
}

/// Records when a wait was dropped before it produced a selection.
struct AbandonGuard<'a> {
    slot: &'a mut Option<Instant>,
    armed: bool,
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            *self.slot = Some(Instant::now());
        }
    }
}

#[async_trait]
impl AnswerSource for LineAnswerSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn await_selection(&mut self) -> Result<Selection, SourceError> {
        self.collect_backlog();

        let mut guard = AbandonGuard {
            slot: &mut self.abandoned_at,
            armed: true,
        };

        let result = loop {
            let event = match self.backlog.pop_front() {
                Some(event) => Some(event),
                None => self.lines.recv().await,
            };
            match event {
                Some(LineEvent::Line { text, at }) => match parse_choice(&text) {
                    Some(choice) => {
                        break Ok(Selection {
                            choice,
                            received_at: at,
                        })
                    }
                    None => continue,
                },
                Some(LineEvent::Failed(e)) => break Err(SourceError::Io(e)),
                None => break Err(SourceError::Closed),
            }
        };
        guard.armed = false;
        drop(guard);
        result
    }
}

impl Drop for LineAnswerSource {
    fn drop(&mut self) {
        if let Some(reader) = &self.reader {
            reader.abort();
        }
    }
}

async fn read_async_lines<R>(reader: R, tx: mpsc::UnboundedSender<LineEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(text)) => LineEvent::Line {
                text,
                at: Instant::now(),
            },
            Ok(None) => break,
            Err(e) => LineEvent::Failed(e),
        };
        let failed = matches!(event, LineEvent::Failed(_));
        if tx.send(event).is_err() || failed {
            break;
        }
    }
}

/// Parse a typed answer. Blank lines are not answers.
fn parse_choice(text: &str) -> Option<Choice> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 => Choice::Index(n - 1),
        _ => Choice::Malformed(trimmed.to_string()),
    })
}
