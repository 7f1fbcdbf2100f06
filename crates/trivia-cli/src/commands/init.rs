//! The `trivia init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create trivia.toml
    if std::path::Path::new("trivia.toml").exists() {
        println!("trivia.toml already exists, skipping.");
    } else {
        std::fs::write("trivia.toml", SAMPLE_CONFIG)?;
        println!("Created trivia.toml");
    }

    // Create example question set
    std::fs::create_dir_all("questions")?;
    let example_path = std::path::Path::new("questions/example.toml");
    if example_path.exists() {
        println!("questions/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_SET)?;
        println!("Created questions/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit questions/example.toml or add your own question sets");
    println!("  2. Run: trivia validate --questions questions/example.toml");
    println!("  3. Run: trivia play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# trivia configuration

# Reveal the expected answer after an incorrect submission.
show_correct_answer = true

[source]
type = "file"
path = "questions/example.toml"

# Or play the built-in quiz:
# [source]
# type = "builtin"
"#;

const EXAMPLE_QUESTION_SET: &str = r#"[question_set]
id = "example"
name = "Example Quiz"
description = "A short quiz showing every question kind"

[[questions]]
id = 1
kind = "multiple_choice"
stem = "What is the capital of France?"
alternatives = ["London", "Paris", "Berlin", "Madrid"]
correct_answer = "Paris"

[[questions]]
id = 2
kind = "true_false"
stem = "The Earth is round."
correct_answer = true

[[questions]]
id = 3
kind = "multiple_answer"
stem = "Which of these are prime numbers? (Select all that apply)"
alternatives = ["2", "3", "4", "9", "11"]
correct_answers = ["2", "3", "11"]

[[questions]]
id = 4
kind = "open_ended"
stem = "Which language has a borrow checker?"
correct_answer = "Rust"
case_sensitive = false
exact_match = false
max_length = 50
"#;
