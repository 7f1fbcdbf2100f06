//! Quiz session state machine.
//!
//! A session moves through `Unloaded -> AwaitingAnswer <-> AnswerRevealed ->
//! Complete`. Every operation either performs one transition or is rejected
//! with a [`SessionError`] and leaves the session untouched.
//!
//! Invariants: `index <= total`, `score` never exceeds the number of graded
//! questions, `outcome` is only set while a question is current, and once the
//! session is complete nothing changes again.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{Answer, Question, QuestionId};
use crate::report::QuizSummary;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No questions yet.
    Unloaded,
    /// A question is current and has not been answered.
    AwaitingAnswer,
    /// The current question has been graded; the player is seeing feedback.
    AnswerRevealed,
    /// Every question has been answered. Terminal.
    Complete,
}

/// Result of grading the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        self == Outcome::Correct
    }
}

impl From<bool> for Outcome {
    fn from(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// One graded submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub answer: Answer,
    pub outcome: Outcome,
}

/// An immutable view of a session at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub status: SessionStatus,
    /// Position of the current question.
    pub index: usize,
    /// Number of loaded questions.
    pub total: usize,
    pub score: usize,
    /// Outcome of the current question, once graded.
    pub outcome: Option<Outcome>,
    pub complete: bool,
    /// The question at `index`, if any.
    pub current_question: Option<Question>,
    /// A question source fetch is in flight.
    pub loading: bool,
    /// Why the last fetch failed, if it did.
    pub load_error: Option<String>,
}

/// One run through an ordered list of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    questions: Option<Vec<Question>>,
    index: usize,
    score: usize,
    outcome: Option<Outcome>,
    history: Vec<AnswerRecord>,
    finished_at: Option<DateTime<Utc>>,
    loading: bool,
    load_error: Option<String>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// Create an empty, unloaded session.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            questions: None,
            index: 0,
            score: 0,
            outcome: None,
            history: Vec::new(),
            finished_at: None,
            loading: false,
            load_error: None,
        }
    }

    /// Populate the session. Only valid once, from `Unloaded`.
    ///
    /// Every question must pass [`Question::validate`] and ids must be
    /// unique, otherwise the session stays unloaded. An empty list is
    /// accepted and completes the session immediately.
    pub fn load(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if self.questions.is_some() {
            return reject(SessionError::AlreadyLoaded);
        }

        if let Some(err) = questions.iter().find_map(|q| q.validate().err()) {
            return reject(SessionError::InvalidQuestion(err));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = questions.iter().find(|q| !seen.insert(q.id())) {
            return reject(SessionError::DuplicateQuestionId(dup.id()));
        }

        tracing::info!(session = %self.id, questions = questions.len(), "quiz loaded");

        if questions.is_empty() {
            self.finished_at = Some(Utc::now());
        }
        self.questions = Some(questions);
        self.index = 0;
        self.score = 0;
        self.outcome = None;
        self.loading = false;
        self.load_error = None;
        Ok(())
    }

    /// Mark a question source fetch as in flight. Only one fetch at a time.
    pub fn begin_load(&mut self) -> Result<(), SessionError> {
        if self.questions.is_some() {
            return reject(SessionError::AlreadyLoaded);
        }
        if self.loading {
            return reject(SessionError::LoadInProgress);
        }
        self.loading = true;
        self.load_error = None;
        Ok(())
    }

    /// Record that the question source failed. The session stays unloaded.
    pub fn fail_load(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        if self.questions.is_some() {
            return reject(SessionError::AlreadyLoaded);
        }
        self.loading = false;
        self.load_error = Some(message.into());
        Ok(())
    }

    /// Grade `answer` for the question with `question_id`.
    ///
    /// The question is looked up by id across the whole list, not by the
    /// current position. Each question is graded at most once per session.
    /// Once the current question has an outcome, further submissions are
    /// rejected until [`advance`](Self::advance) is called.
    pub fn submit_answer(
        &mut self,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<Outcome, SessionError> {
        let Some(questions) = &self.questions else {
            return reject(SessionError::NotLoaded);
        };
        if self.index >= questions.len() {
            return reject(SessionError::Complete);
        }
        let Some(question) = questions.iter().find(|q| q.id() == question_id) else {
            return reject(SessionError::UnknownQuestion(question_id));
        };
        if self.outcome.is_some() {
            return reject(SessionError::AlreadyAnswered(questions[self.index].id()));
        }
        if self.is_answered(question_id) {
            return reject(SessionError::AlreadyAnswered(question_id));
        }

        let outcome = Outcome::from(question.grade(&answer));
        tracing::debug!(session = %self.id, question_id, ?outcome, "answer graded");

        self.outcome = Some(outcome);
        if outcome.is_correct() {
            self.score += 1;
        }
        self.history.push(AnswerRecord {
            question_id,
            answer,
            outcome,
        });
        Ok(outcome)
    }

    /// Move past the current question once its outcome has been revealed.
    ///
    /// A current question that was already graded out of order may be passed
    /// without a new outcome. Returns the status after the move; `Complete`
    /// after the last question.
    pub fn advance(&mut self) -> Result<SessionStatus, SessionError> {
        let Some(questions) = &self.questions else {
            return reject(SessionError::NotLoaded);
        };
        if self.index >= questions.len() {
            return reject(SessionError::Complete);
        }
        if self.outcome.is_none() && !self.is_answered(questions[self.index].id()) {
            return reject(SessionError::NotRevealed);
        }

        self.outcome = None;
        self.index += 1;
        if self.index == questions.len() {
            self.finished_at = Some(Utc::now());
            tracing::info!(session = %self.id, score = self.score, total = questions.len(), "quiz complete");
        } else {
            tracing::debug!(session = %self.id, index = self.index, "advanced");
        }
        Ok(self.status())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        match &self.questions {
            None => SessionStatus::Unloaded,
            Some(questions) if self.index >= questions.len() => SessionStatus::Complete,
            Some(_) if self.outcome.is_some() => SessionStatus::AnswerRevealed,
            Some(_) => SessionStatus::AwaitingAnswer,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Number of loaded questions (0 while unloaded).
    pub fn total(&self) -> usize {
        self.questions.as_ref().map_or(0, Vec::len)
    }

    pub fn is_loaded(&self) -> bool {
        self.questions.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SessionStatus::Complete
    }

    /// All loaded questions, in order.
    pub fn questions(&self) -> &[Question] {
        self.questions.as_deref().unwrap_or_default()
    }

    /// The question at the current position, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.as_ref()?.get(self.index)
    }

    /// Graded submissions, in order.
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// Whether `question_id` has been graded in this session.
    pub fn is_answered(&self, question_id: QuestionId) -> bool {
        self.history.iter().any(|r| r.question_id == question_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let status = self.status();
        SessionSnapshot {
            session_id: self.id,
            status,
            index: self.index,
            total: self.total(),
            score: self.score,
            outcome: self.outcome,
            complete: status == SessionStatus::Complete,
            current_question: self.current_question().cloned(),
            loading: self.loading,
            load_error: self.load_error.clone(),
        }
    }

    /// Summarize the run so far.
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            session_id: self.id,
            started_at: self.created_at,
            finished_at: self.finished_at,
            score: self.score,
            total: self.total(),
            answers: self.history.clone(),
        }
    }
}

fn reject<T>(err: SessionError) -> Result<T, SessionError> {
    tracing::warn!("rejected: {err}");
    Err(err)
}
