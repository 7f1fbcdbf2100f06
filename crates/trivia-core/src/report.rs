//! End-of-quiz summary with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::QuestionId;
use crate::session::{AnswerRecord, Outcome};

/// The result of one quiz run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    /// The session this summary was taken from.
    pub session_id: Uuid,
    /// When the session was created.
    pub started_at: DateTime<Utc>,
    /// When the last question was passed. `None` while the quiz is running.
    pub finished_at: Option<DateTime<Utc>>,
    /// Number of correctly answered questions.
    pub score: usize,
    /// Number of questions in the quiz.
    pub total: usize,
    /// Graded submissions, in order.
    pub answers: Vec<AnswerRecord>,
}

impl QuizSummary {
    /// Score as a percentage of the total. An empty quiz scores 0.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Ids of the questions answered incorrectly.
    pub fn missed(&self) -> Vec<QuestionId> {
        self.answers
            .iter()
            .filter(|a| a.outcome == Outcome::Incorrect)
            .map(|a| a.question_id)
            .collect()
    }

    /// Save the summary as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read summary from {}", path.display()))?;
        let summary: QuizSummary =
            serde_json::from_str(&content).context("failed to parse summary JSON")?;
        Ok(summary)
    }
}
