//! The `quizrace init` command.

use anyhow::Result;

use quizrace_core::bank::GENERAL_KNOWLEDGE_TOML;

pub fn execute() -> Result<()> {
    // Create quizrace.toml
    if std::path::Path::new("quizrace.toml").exists() {
        println!("quizrace.toml already exists, skipping.");
    } else {
        std::fs::write("quizrace.toml", SAMPLE_CONFIG)?;
        println!("Created quizrace.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/general.toml");
    if example_path.exists() {
        println!("quizzes/general.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, GENERAL_KNOWLEDGE_TOML)?;
        println!("Created quizzes/general.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/general.toml or add your own quiz files");
    println!("  2. Run: quizrace validate --quiz quizzes/general.toml");
    println!("  3. Run: quizrace run --quiz quizzes/general.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrace configuration

# Seconds allowed per question, unless a quiz or question says otherwise.
time_limit_secs = 10

# Print a per-question table after the quiz.
show_summary_table = true

# Where answers come from: "stdin", or "file" with a path.
[source]
type = "stdin"
"#;
