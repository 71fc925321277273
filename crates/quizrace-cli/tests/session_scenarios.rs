//! End-to-end session scenarios driven by scripted answers under paused time.

use std::time::Duration;

use quizrace_core::bank;
use quizrace_core::clock::SystemClock;
use quizrace_core::traits::NoopPresenter;
use quizrace_core::{Choice, Outcome, Question, Quiz, QuizError, QuizSession, SessionConfig};
use quizrace_sources::ScriptedAnswerSource;

fn two_question_quiz() -> Quiz {
    Quiz {
        id: "two".into(),
        name: "Two".into(),
        description: String::new(),
        questions: vec![
            Question::new(
                "What is the capital of France?",
                vec!["Berlin".into(), "Madrid".into(), "Paris".into(), "Rome".into()],
                2,
            )
            .unwrap(),
            Question::new(
                "Which planet is known as the Red Planet?",
                vec!["Earth".into(), "Mars".into(), "Venus".into(), "Jupiter".into()],
                1,
            )
            .unwrap(),
        ],
        time_limit: None,
    }
}

fn session(quiz: Quiz) -> QuizSession {
    QuizSession::new(
        quiz,
        SessionConfig {
            time_limit: Duration::from_secs(10),
        },
    )
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn answer_then_silence() {
    let mut source = ScriptedAnswerSource::default()
        .answer(Duration::from_secs(3), 2)
        .silence();

    let report = session(two_question_quiz())
        .run(&mut source, &SystemClock, &NoopPresenter)
        .await
        .unwrap();

    assert_eq!(report.score, 1);
    assert_eq!(report.total, 2);
    let outcomes: Vec<_> = report.entries.iter().map(|e| e.outcome.clone()).collect();
    assert_eq!(outcomes, vec![Outcome::Correct, Outcome::TimedOut]);
    assert!(report.is_complete());
}

#[tokio::test(start_paused = true)]
async fn input_failure_after_first_question() {
    let mut source = ScriptedAnswerSource::default()
        .answer(Duration::from_secs(1), 2)
        .fail();

    let err = session(two_question_quiz())
        .run(&mut source, &SystemClock, &NoopPresenter)
        .await
        .unwrap_err();

    assert!(err.is_fatal_input_failure());
    let partial = err.partial_report().unwrap();
    assert_eq!(partial.entries.len(), 1);
    assert_eq!(partial.entries[0].outcome, Outcome::Correct);
    assert_eq!(partial.score, 1);
    assert!(!partial.is_complete());
    assert!(matches!(err, QuizError::InputSourceFailure { .. }));
}

#[tokio::test(start_paused = true)]
async fn late_answer_does_not_leak_into_next_question() {
    // The first answer arrives after the deadline and is lost with the wait.
    let mut source = ScriptedAnswerSource::default()
        .answer(Duration::from_secs(15), 2)
        .answer(Duration::from_secs(2), 0);

    let report = session(two_question_quiz())
        .run(&mut source, &SystemClock, &NoopPresenter)
        .await
        .unwrap();

    assert_eq!(report.entries[0].outcome, Outcome::TimedOut);
    assert_eq!(
        report.entries[1].outcome,
        Outcome::Incorrect {
            choice: Choice::Index(0)
        }
    );
    assert_eq!(report.score, 0);
    assert_eq!(source.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn malformed_input_counts_as_incorrect() {
    let mut source = ScriptedAnswerSource::default()
        .malformed(Duration::from_secs(1), "paris")
        .answer(Duration::from_secs(1), 1);

    let report = session(two_question_quiz())
        .run(&mut source, &SystemClock, &NoopPresenter)
        .await
        .unwrap();

    assert_eq!(
        report.entries[0].outcome,
        Outcome::Incorrect {
            choice: Choice::Malformed("paris".into())
        }
    );
    assert_eq!(report.entries[1].outcome, Outcome::Correct);
    assert_eq!(report.score, 1);
}

#[tokio::test(start_paused = true)]
async fn builtin_bank_mixed_outcomes() {
    let quiz = bank::general_knowledge().unwrap();
    let mut source = ScriptedAnswerSource::default()
        .answer(Duration::from_secs(1), 2)
        .answer(Duration::from_secs(1), 1)
        .silence()
        .answer(Duration::from_secs(9), 0)
        .answer(Duration::from_secs(1), 2);

    let report = session(quiz)
        .run(&mut source, &SystemClock, &NoopPresenter)
        .await
        .unwrap();

    assert_eq!(report.total, 5);
    assert_eq!(report.score, 3);
    assert_eq!(report.incorrect_count(), 1);
    assert_eq!(report.timed_out_count(), 1);
    assert_eq!(report.summary_lines()[2], "Question 3: Not answered (Time's up)");
    assert_eq!(source.remaining(), 0);
}
