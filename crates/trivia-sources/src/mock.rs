//! Mock question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use trivia_core::model::Question;
use trivia_core::traits::QuestionSource;

/// A question source for testing sessions without touching the filesystem.
///
/// Returns either a fixed question list or a fixed failure, and counts calls.
pub struct MockSource {
    questions: Vec<Question>,
    failure: Option<String>,
    call_count: AtomicU32,
}

impl MockSource {
    /// Create a mock that always delivers `questions`.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            failure: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock whose every fetch fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            questions: Vec::new(),
            failure: Some(message.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Get the number of fetches made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_questions(&self) -> anyhow::Result<Vec<Question>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(self.questions.clone()),
        }
    }
}
