//! TOML question set file source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use trivia_core::model::Question;
use trivia_core::parser::{parse_question_set_str, validate_question_set};
use trivia_core::traits::QuestionSource;

use crate::error::SourceError;

/// Reads questions from a TOML question set file.
///
/// The file is read on every fetch; a set with validation warnings is
/// refused as a whole.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_questions(&self) -> anyhow::Result<Vec<Question>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SourceError::NotFound(self.path.clone()).into());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read question set file: {}", self.path.display())
                });
            }
        };
        let set = parse_question_set_str(&content, &self.path)?;

        if set.questions.is_empty() {
            return Err(SourceError::Empty(set.name).into());
        }

        let warnings = validate_question_set(&set);
        if !warnings.is_empty() {
            let reason = warnings
                .iter()
                .map(|w| w.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SourceError::Invalid {
                path: self.path.clone(),
                reason,
            }
            .into());
        }

        tracing::info!(
            set = %set.id,
            questions = set.questions.len(),
            "loaded question set from {}",
            self.path.display()
        );
        Ok(set.questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SET: &str = r#"
[question_set]
id = "capitals"
name = "Capitals"

[[questions]]
id = 1
kind = "multiple_choice"
stem = "What is the capital of France?"
alternatives = ["London", "Paris", "Berlin", "Madrid"]
correct_answer = "Paris"

[[questions]]
id = 2
kind = "true_false"
stem = "Canberra is the capital of Australia."
correct_answer = true
"#;

    #[tokio::test]
    async fn reads_questions_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capitals.toml");
        std::fs::write(&path, SET).unwrap();

        let questions = FileSource::new(&path).fetch_questions().await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id(), 1);
        assert_eq!(questions[1].stem(), "Canberra is the capital of Australia.");
    }

    #[tokio::test]
    async fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.toml"))
            .fetch_questions()
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unreadable_path_is_not_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path()).fetch_questions().await.unwrap_err();
        assert!(err.downcast_ref::<SourceError>().is_none());
        assert!(err.to_string().contains("failed to read question set file"));
    }

    #[tokio::test]
    async fn empty_set_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "[question_set]\nid = \"e\"\nname = \"Empty\"\n").unwrap();

        let err = FileSource::new(&path).fetch_questions().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SourceError>(),
            Some(SourceError::Empty(name)) if name == "Empty"
        ));
    }

    #[tokio::test]
    async fn invalid_set_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dupes.toml");
        let dupes = format!(
            "{SET}\n[[questions]]\nid = 2\nkind = \"true_false\"\nstem = \"Again\"\ncorrect_answer = false\n"
        );
        std::fs::write(&path, dupes).unwrap();

        let err = FileSource::new(&path).fetch_questions().await.unwrap_err();
        assert!(err.to_string().contains("duplicate question ID: 2"));
    }
}
