//! The `quizrace run` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use quizrace_core::bank;
use quizrace_core::clock::SystemClock;
use quizrace_core::parser;
use quizrace_core::report::QuizReport;
use quizrace_core::session::{QuizSession, SessionConfig};
use quizrace_core::traits::AnswerSource;
use quizrace_sources::config::load_config_from;
use quizrace_sources::{create_source, LineAnswerSource};

use crate::presenter::ConsolePresenter;

pub async fn execute(
    quiz_path: Option<PathBuf>,
    time_limit: Option<u64>,
    answers: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    // Validate inputs
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown"),
        "unknown format '{format}', expected text, json or markdown"
    );

    // Load config
    let config = load_config_from(config_path.as_deref())?;

    // Load quiz
    let mut quiz = match &quiz_path {
        Some(path) => parser::parse_quiz(path)?,
        None => bank::general_knowledge()?,
    };
    if let Some(secs) = time_limit {
        quiz.time_limit = Some(Duration::from_secs(secs));
    }

    let session = QuizSession::new(
        quiz,
        SessionConfig {
            time_limit: config.time_limit(),
        },
    )?;

    let mut source: Box<dyn AnswerSource> = match &answers {
        Some(path) => Box::new(LineAnswerSource::from_file(path)?),
        None => create_source(&config.source)?,
    };

    let presenter = ConsolePresenter::new(format != "text");
    eprintln!(
        "quizrace v{}: {} ({} questions)",
        env!("CARGO_PKG_VERSION"),
        session.quiz().name,
        session.quiz().questions.len()
    );

    let report = session
        .run(source.as_mut(), &SystemClock, &presenter)
        .await?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" => print!("{}", report.to_markdown()),
        _ => {
            if config.show_summary_table {
                print_summary(&report);
            }
        }
    }

    Ok(())
}

fn print_summary(report: &QuizReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Result", "Time"]);

    for entry in &report.entries {
        table.add_row(vec![
            Cell::new(entry.question_index + 1),
            Cell::new(&entry.prompt),
            Cell::new(entry.outcome.to_string()),
            Cell::new(format!("{:.1}s", entry.elapsed_ms as f64 / 1000.0)),
        ]);
    }

    println!("\n{table}");
    println!(
        "Score: {:.1}% ({} correct, {} incorrect, {} timed out)",
        report.percentage() * 100.0,
        report.score,
        report.incorrect_count(),
        report.timed_out_count()
    );
}
