//! Answer grading.
//!
//! [`grade`] is pure and total: a wrong answer, an answer of the wrong shape,
//! and an over-long answer all grade as `false`.

use std::borrow::Cow;

use crate::model::{Answer, Question};

/// Grade `answer` against `question`.
///
/// - Multiple choice: the text must equal the correct answer exactly.
/// - True/false: the boolean must equal the correct answer.
/// - Multiple answer: the selection must equal the correct answers as a set.
/// - Open ended: see [`grade_open_ended`].
pub fn grade(question: &Question, answer: &Answer) -> bool {
    match (question, answer) {
        (Question::MultipleChoice { correct_answer, .. }, Answer::Text(given)) => {
            given == correct_answer
        }
        (Question::TrueFalse { correct_answer, .. }, Answer::Boolean(given)) => {
            given == correct_answer
        }
        (
            Question::MultipleAnswer {
                correct_answers, ..
            },
            Answer::Selection(given),
        ) => given == correct_answers,
        (
            Question::OpenEnded {
                correct_answer,
                case_sensitive,
                exact_match,
                max_length,
                ..
            },
            Answer::Text(given),
        ) => grade_open_ended(
            given,
            correct_answer,
            *case_sensitive,
            *exact_match,
            *max_length,
        ),
        _ => false,
    }
}

/// Match free text against the expected answer.
///
/// Answers longer than `max_length` characters fail regardless of content.
/// Both sides are lower-cased unless `case_sensitive`. With `exact_match` the
/// strings must be equal, otherwise the answer must contain the expected text.
pub fn grade_open_ended(
    given: &str,
    expected: &str,
    case_sensitive: bool,
    exact_match: bool,
    max_length: usize,
) -> bool {
    if given.chars().count() > max_length {
        return false;
    }

    let (given, expected): (Cow<'_, str>, Cow<'_, str>) = if case_sensitive {
        (Cow::Borrowed(given), Cow::Borrowed(expected))
    } else {
        (
            Cow::Owned(given.to_lowercase()),
            Cow::Owned(expected.to_lowercase()),
        )
    };

    if exact_match {
        given == expected
    } else {
        given.contains(expected.as_ref())
    }
}
