//! Domain error types.
//!
//! `QuestionError` reports a question that violates its construction
//! constraints. `SessionError` reports a quiz session call that was rejected
//! without changing any state.

use thiserror::Error;

use crate::model::QuestionId;

/// A question that cannot be part of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// Question ids start at 1.
    #[error("question id must be positive")]
    ZeroId,

    /// The prompt text is empty or whitespace.
    #[error("question {0}: stem is empty")]
    EmptyStem(QuestionId),

    /// A choice question lists the same alternative twice.
    #[error("question {id}: duplicate alternative '{alternative}'")]
    DuplicateAlternative { id: QuestionId, alternative: String },

    /// The correct answer is not one of the alternatives.
    #[error("question {id}: correct answer '{answer}' is not an alternative")]
    AnswerNotAnAlternative { id: QuestionId, answer: String },

    /// A multiple-answer question has no correct answers.
    #[error("question {0}: correct answer set is empty")]
    NoCorrectAnswers(QuestionId),

    /// An open-ended question allows no characters at all.
    #[error("question {0}: max_length must be positive")]
    ZeroMaxLength(QuestionId),

    /// The expected answer of an open-ended question exceeds its own limit.
    #[error("question {id}: correct answer is longer than max_length {max_length}")]
    AnswerTooLong { id: QuestionId, max_length: usize },
}

/// A quiz session call that was rejected as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session already received its questions.
    #[error("session is already loaded")]
    AlreadyLoaded,

    /// A question source fetch is already in flight.
    #[error("questions are already being loaded")]
    LoadInProgress,

    /// No questions have been loaded yet.
    #[error("session has not been loaded")]
    NotLoaded,

    /// A question handed to `load` breaks its construction constraints.
    #[error("invalid question: {0}")]
    InvalidQuestion(#[from] QuestionError),

    /// The question list handed to `load` repeats an id.
    #[error("duplicate question id {0}")]
    DuplicateQuestionId(QuestionId),

    /// No loaded question has this id.
    #[error("unknown question id {0}")]
    UnknownQuestion(QuestionId),

    /// The question was already graded in this session.
    #[error("question {0} has already been answered")]
    AlreadyAnswered(QuestionId),

    /// `advance` was called before the current question was graded.
    #[error("current question has not been answered yet")]
    NotRevealed,

    /// Every question has been answered.
    #[error("quiz is complete")]
    Complete,
}
