//! Core trait definitions for question sources.
//!
//! Implemented by the `trivia-sources` crate.

use async_trait::async_trait;

use crate::model::Question;

/// Supplies the ordered question list for a quiz.
///
/// A session calls `fetch_questions` once and loads the first successful
/// delivery; later deliveries are ignored.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "builtin").
    fn name(&self) -> &str;

    /// Fetch the questions, in presentation order.
    async fn fetch_questions(&self) -> anyhow::Result<Vec<Question>>;
}
