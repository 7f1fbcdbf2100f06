//! The `trivia list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use trivia_core::parser;
use trivia_sources::BuiltinSource;

pub fn execute(questions_path: Option<PathBuf>) -> Result<()> {
    let (name, questions) = match questions_path {
        Some(path) => {
            let set = parser::parse_question_set(&path)?;
            (set.name, set.questions)
        }
        None => ("Built-in".to_string(), BuiltinSource::questions()?),
    };

    let mut table = Table::new();
    table.set_header(vec!["ID", "Kind", "Question"]);
    for q in &questions {
        table.add_row(vec![
            Cell::new(q.id()),
            Cell::new(q.kind()),
            Cell::new(q.stem()),
        ]);
    }

    println!("{name} ({} questions)", questions.len());
    println!("{table}");

    Ok(())
}
