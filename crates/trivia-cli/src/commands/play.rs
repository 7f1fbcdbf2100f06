//! The `trivia play` command.
//!
//! Renders the session snapshot, reads one answer per line, and drives the
//! session through submit and advance until the quiz is complete or input
//! runs out.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use trivia_core::handle::SessionHandle;
use trivia_core::model::{Answer, Question};
use trivia_core::session::{Outcome, SessionSnapshot};
use trivia_core::traits::QuestionSource;
use trivia_sources::config::load_config_from;
use trivia_sources::{create_source, FileSource};

pub async fn execute(
    questions_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let source: Box<dyn QuestionSource> = match questions_path {
        Some(path) => Box::new(FileSource::new(path)),
        None => create_source(&config.source),
    };

    let handle = SessionHandle::new();
    let count = handle.load_from(source.as_ref()).await?;
    tracing::info!(source = source.name(), "loaded {count} questions");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_quiz(
        &handle,
        stdin.lock(),
        &mut stdout,
        config.show_correct_answer,
    )?;

    if let Some(path) = summary_path {
        handle.summary().save_json(&path)?;
        println!("Summary saved to: {}", path.display());
    }

    Ok(())
}

/// Play the loaded session until it completes or `input` ends.
///
/// Returns `true` if the quiz was completed.
pub fn run_quiz<R: BufRead, W: Write>(
    handle: &SessionHandle,
    mut input: R,
    out: &mut W,
    show_correct_answer: bool,
) -> Result<bool> {
    loop {
        let snapshot = handle.snapshot();
        let Some(question) = snapshot.current_question.as_ref() else {
            break;
        };

        render_question(out, &snapshot, question)?;

        let Some(answer) = read_answer(&mut input, out, question)? else {
            let snapshot = handle.snapshot();
            writeln!(
                out,
                "\nQuiz ended early. Score: {}/{}",
                snapshot.score, snapshot.total
            )?;
            return Ok(false);
        };

        match handle.submit_answer(question.id(), answer) {
            Ok(Outcome::Correct) => writeln!(out, "Correct!")?,
            Ok(Outcome::Incorrect) => {
                if show_correct_answer {
                    writeln!(
                        out,
                        "Incorrect. The answer was: {}",
                        question.expected_answer()
                    )?;
                } else {
                    writeln!(out, "Incorrect.")?;
                }
            }
            Err(e) => tracing::warn!("answer not accepted: {e}"),
        }

        handle.advance()?;
        writeln!(out)?;
    }

    let summary = handle.summary();
    writeln!(
        out,
        "Quiz complete! Score: {}/{} ({:.1}%)",
        summary.score,
        summary.total,
        summary.percentage()
    )?;
    Ok(true)
}

fn render_question<W: Write>(
    out: &mut W,
    snapshot: &SessionSnapshot,
    question: &Question,
) -> io::Result<()> {
    writeln!(
        out,
        "Question {}/{} ({}) Score: {}",
        snapshot.index + 1,
        snapshot.total,
        question.kind(),
        snapshot.score
    )?;
    writeln!(out, "{}", question.stem())?;

    match question {
        Question::MultipleChoice { alternatives, .. } => {
            for (i, alt) in alternatives.iter().enumerate() {
                writeln!(out, "  {}. {alt}", i + 1)?;
            }
        }
        Question::MultipleAnswer { alternatives, .. } => {
            for (i, alt) in alternatives.iter().enumerate() {
                writeln!(out, "  {}. {alt}", i + 1)?;
            }
            writeln!(out, "  (select all that apply, comma-separated)")?;
        }
        Question::TrueFalse { .. } => writeln!(out, "  (true/false)")?,
        Question::OpenEnded { max_length, .. } => {
            writeln!(out, "  (up to {max_length} characters)")?
        }
    }
    Ok(())
}

/// Prompt until a well-formed answer is entered. `None` on end of input.
fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &Question,
) -> Result<Option<Answer>> {
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match parse_answer(question, line) {
            Ok(answer) => return Ok(Some(answer)),
            Err(hint) => writeln!(out, "{hint}")?,
        }
    }
}

/// Turn one line of player input into an answer of the question's shape.
pub fn parse_answer(question: &Question, line: &str) -> Result<Answer, String> {
    match question {
        Question::MultipleChoice { alternatives, .. } => {
            pick_alternative(alternatives, line.trim()).map(Answer::Text)
        }
        Question::TrueFalse { .. } => match line.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" => Ok(Answer::Boolean(true)),
            "false" | "f" | "no" | "n" => Ok(Answer::Boolean(false)),
            _ => Err("Enter true or false.".to_string()),
        },
        Question::MultipleAnswer { alternatives, .. } => {
            let picks = line
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| pick_alternative(alternatives, s))
                .collect::<Result<Vec<_>, _>>()?;
            if picks.is_empty() {
                return Err("Select at least one option.".to_string());
            }
            Ok(Answer::selection(picks))
        }
        Question::OpenEnded { .. } => {
            if line.trim().is_empty() {
                Err("Enter an answer.".to_string())
            } else {
                Ok(Answer::Text(line.to_string()))
            }
        }
    }
}

/// Resolve a 1-based option number or the exact option text.
fn pick_alternative(alternatives: &[String], input: &str) -> Result<String, String> {
    if let Some(alt) = alternatives.iter().find(|a| a.as_str() == input) {
        return Ok(alt.clone());
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| alternatives.get(i))
        .cloned()
        .ok_or_else(|| {
            format!(
                "Enter a number between 1 and {} or the option text.",
                alternatives.len()
            )
        })
}
