//! Core data model types for trivia.
//!
//! A [`Question`] is one of a closed set of kinds, each with its own
//! answer-matching rule (see [`crate::grading`]). An [`Answer`] is the shape a
//! player submits; it must match the kind of question it answers.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

/// Identifier of a question, unique within a session. Always positive.
pub type QuestionId = u32;

/// Default maximum answer length for open-ended questions, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// A single quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    /// Pick exactly one of the alternatives.
    MultipleChoice {
        id: QuestionId,
        stem: String,
        alternatives: Vec<String>,
        correct_answer: String,
    },
    /// Answer true or false.
    TrueFalse {
        id: QuestionId,
        stem: String,
        correct_answer: bool,
    },
    /// Pick every correct alternative, and nothing else.
    MultipleAnswer {
        id: QuestionId,
        stem: String,
        alternatives: Vec<String>,
        correct_answers: BTreeSet<String>,
    },
    /// Free-text answer matched against an expected string.
    OpenEnded {
        id: QuestionId,
        stem: String,
        correct_answer: String,
        /// Whether case matters when matching.
        #[serde(default)]
        case_sensitive: bool,
        /// Require the whole answer to match instead of containing the expected text.
        #[serde(default)]
        exact_match: bool,
        /// Longest accepted answer, in characters.
        #[serde(default = "default_max_length")]
        max_length: usize,
    },
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

/// Matching options for an open-ended question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenEndedOptions {
    pub case_sensitive: bool,
    pub exact_match: bool,
    pub max_length: usize,
}

impl Default for OpenEndedOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            exact_match: false,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl OpenEndedOptions {
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn exact_match(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

/// The kind of a question, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    MultipleAnswer,
    OpenEnded,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::TrueFalse => write!(f, "true-false"),
            QuestionKind::MultipleAnswer => write!(f, "multiple-answer"),
            QuestionKind::OpenEnded => write!(f, "open-ended"),
        }
    }
}

impl Question {
    /// Build a validated multiple-choice question.
    pub fn multiple_choice(
        id: QuestionId,
        stem: impl Into<String>,
        alternatives: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let question = Question::MultipleChoice {
            id,
            stem: stem.into(),
            alternatives: alternatives.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        };
        question.validate()?;
        Ok(question)
    }

    /// Build a validated true/false question.
    pub fn true_false(
        id: QuestionId,
        stem: impl Into<String>,
        correct_answer: bool,
    ) -> Result<Self, QuestionError> {
        let question = Question::TrueFalse {
            id,
            stem: stem.into(),
            correct_answer,
        };
        question.validate()?;
        Ok(question)
    }

    /// Build a validated multiple-answer question.
    pub fn multiple_answer(
        id: QuestionId,
        stem: impl Into<String>,
        alternatives: impl IntoIterator<Item = impl Into<String>>,
        correct_answers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, QuestionError> {
        let question = Question::MultipleAnswer {
            id,
            stem: stem.into(),
            alternatives: alternatives.into_iter().map(Into::into).collect(),
            correct_answers: correct_answers.into_iter().map(Into::into).collect(),
        };
        question.validate()?;
        Ok(question)
    }

    /// Build a validated open-ended question.
    pub fn open_ended(
        id: QuestionId,
        stem: impl Into<String>,
        correct_answer: impl Into<String>,
        options: OpenEndedOptions,
    ) -> Result<Self, QuestionError> {
        let question = Question::OpenEnded {
            id,
            stem: stem.into(),
            correct_answer: correct_answer.into(),
            case_sensitive: options.case_sensitive,
            exact_match: options.exact_match,
            max_length: options.max_length,
        };
        question.validate()?;
        Ok(question)
    }

    pub fn id(&self) -> QuestionId {
        match self {
            Question::MultipleChoice { id, .. }
            | Question::TrueFalse { id, .. }
            | Question::MultipleAnswer { id, .. }
            | Question::OpenEnded { id, .. } => *id,
        }
    }

    /// The prompt text shown to the player.
    pub fn stem(&self) -> &str {
        match self {
            Question::MultipleChoice { stem, .. }
            | Question::TrueFalse { stem, .. }
            | Question::MultipleAnswer { stem, .. }
            | Question::OpenEnded { stem, .. } => stem,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Question::TrueFalse { .. } => QuestionKind::TrueFalse,
            Question::MultipleAnswer { .. } => QuestionKind::MultipleAnswer,
            Question::OpenEnded { .. } => QuestionKind::OpenEnded,
        }
    }

    /// The selectable options, for choice-type questions.
    pub fn alternatives(&self) -> Option<&[String]> {
        match self {
            Question::MultipleChoice { alternatives, .. }
            | Question::MultipleAnswer { alternatives, .. } => Some(alternatives),
            Question::TrueFalse { .. } | Question::OpenEnded { .. } => None,
        }
    }

    /// The correct answer, in the shape this question expects.
    pub fn expected_answer(&self) -> Answer {
        match self {
            Question::MultipleChoice { correct_answer, .. }
            | Question::OpenEnded { correct_answer, .. } => Answer::Text(correct_answer.clone()),
            Question::TrueFalse { correct_answer, .. } => Answer::Boolean(*correct_answer),
            Question::MultipleAnswer {
                correct_answers, ..
            } => Answer::Selection(correct_answers.clone()),
        }
    }

    /// Grade an answer against this question. See [`crate::grading::grade`].
    pub fn grade(&self, answer: &Answer) -> bool {
        crate::grading::grade(self, answer)
    }

    /// Check the construction constraints of this question.
    pub fn validate(&self) -> Result<(), QuestionError> {
        let id = self.id();
        if id == 0 {
            return Err(QuestionError::ZeroId);
        }
        if self.stem().trim().is_empty() {
            return Err(QuestionError::EmptyStem(id));
        }

        match self {
            Question::MultipleChoice {
                alternatives,
                correct_answer,
                ..
            } => {
                check_distinct(id, alternatives)?;
                if !alternatives.contains(correct_answer) {
                    return Err(QuestionError::AnswerNotAnAlternative {
                        id,
                        answer: correct_answer.clone(),
                    });
                }
            }
            Question::TrueFalse { .. } => {}
            Question::MultipleAnswer {
                alternatives,
                correct_answers,
                ..
            } => {
                check_distinct(id, alternatives)?;
                if correct_answers.is_empty() {
                    return Err(QuestionError::NoCorrectAnswers(id));
                }
                if let Some(stray) = correct_answers.iter().find(|a| !alternatives.contains(*a)) {
                    return Err(QuestionError::AnswerNotAnAlternative {
                        id,
                        answer: stray.clone(),
                    });
                }
            }
            Question::OpenEnded {
                correct_answer,
                max_length,
                ..
            } => {
                if *max_length == 0 {
                    return Err(QuestionError::ZeroMaxLength(id));
                }
                // Otherwise the question could never be answered correctly.
                if correct_answer.chars().count() > *max_length {
                    return Err(QuestionError::AnswerTooLong {
                        id,
                        max_length: *max_length,
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_distinct(id: QuestionId, alternatives: &[String]) -> Result<(), QuestionError> {
    let mut seen = HashSet::new();
    for alternative in alternatives {
        if !seen.insert(alternative.as_str()) {
            return Err(QuestionError::DuplicateAlternative {
                id,
                alternative: alternative.clone(),
            });
        }
    }
    Ok(())
}

/// A player's submitted answer.
///
/// Serialized untagged: a JSON string, boolean, or array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// A single string, for multiple-choice and open-ended questions.
    Text(String),
    /// For true/false questions.
    Boolean(bool),
    /// A set of strings, for multiple-answer questions.
    Selection(BTreeSet<String>),
}

impl Answer {
    /// Build a selection answer. Order and duplicates are irrelevant.
    pub fn selection(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Answer::Selection(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Text(value.to_string())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer::Text(value)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::Boolean(value)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => write!(f, "{text}"),
            Answer::Boolean(value) => write!(f, "{value}"),
            Answer::Selection(items) => {
                let joined: Vec<&str> = items.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}
