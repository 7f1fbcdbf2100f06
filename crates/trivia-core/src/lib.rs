//! trivia-core — Question model, answer grading, and quiz sessions.
//!
//! This crate defines the question and answer types, the grading rules for
//! each question kind, and the quiz session state machine that the rest of
//! trivia builds on.

pub mod error;
pub mod grading;
pub mod handle;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
pub mod traits;

pub use error::{QuestionError, SessionError};
pub use grading::grade;
pub use handle::SessionHandle;
pub use model::{Answer, OpenEndedOptions, Question, QuestionId, QuestionKind};
pub use report::QuizSummary;
pub use session::{Outcome, QuizSession, SessionSnapshot, SessionStatus};
pub use traits::QuestionSource;
