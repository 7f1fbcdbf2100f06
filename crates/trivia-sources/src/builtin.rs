//! The built-in sample quiz.

use async_trait::async_trait;

use trivia_core::error::QuestionError;
use trivia_core::model::{OpenEndedOptions, Question};
use trivia_core::traits::QuestionSource;

/// Serves a fixed set of Android development questions.
///
/// Used when neither the command line nor the config names a question file.
#[derive(Debug, Default)]
pub struct BuiltinSource;

impl BuiltinSource {
    pub fn new() -> Self {
        Self
    }

    /// The built-in questions, in presentation order.
    pub fn questions() -> Result<Vec<Question>, QuestionError> {
        Ok(vec![
            Question::multiple_choice(
                1,
                "Which of the following is the preferred programming language for Android app development?",
                ["Swift", "Kotlin", "Objective-C", "Java"],
                "Kotlin",
            )?,
            Question::true_false(
                2,
                "Android Studio is the official IDE for Android development.",
                true,
            )?,
            Question::multiple_answer(
                3,
                "Which of the following are core Android components? (Select all that apply)",
                [
                    "Activity",
                    "Service",
                    "Content Provider",
                    "Broadcast Receiver",
                    "Fragment",
                    "ViewModel",
                ],
                ["Activity", "Service", "Content Provider", "Broadcast Receiver"],
            )?,
            Question::multiple_choice(
                4,
                "What is the purpose of the 'AndroidManifest.xml' file in an Android project?",
                [
                    "To define the layout of the user interface",
                    "To declare the app's components and permissions",
                    "To store the app's data",
                    "To manage the app's network connections",
                ],
                "To declare the app's components and permissions",
            )?,
            Question::true_false(
                5,
                "Jetpack Compose is a modern toolkit for building native Android UI.",
                true,
            )?,
            Question::open_ended(
                6,
                "What is the name of the Android build system tool that replaced Ant?",
                "Gradle",
                OpenEndedOptions::default().exact_match(true),
            )?,
        ])
    }
}

#[async_trait]
impl QuestionSource for BuiltinSource {
    fn name(&self) -> &str {
        "builtin"
    }

    async fn fetch_questions(&self) -> anyhow::Result<Vec<Question>> {
        Ok(Self::questions()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use trivia_core::model::QuestionKind;
    use trivia_core::parser::{validate_question_set, QuestionSet};

    #[test]
    fn builtin_questions_are_valid() {
        let set = QuestionSet {
            id: "builtin".into(),
            name: "Built-in".into(),
            description: String::new(),
            questions: BuiltinSource::questions().unwrap(),
        };
        let warnings = validate_question_set(&set);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn covers_every_kind() {
        let questions = BuiltinSource::questions().unwrap();
        for kind in [
            QuestionKind::MultipleChoice,
            QuestionKind::TrueFalse,
            QuestionKind::MultipleAnswer,
            QuestionKind::OpenEnded,
        ] {
            assert!(questions.iter().any(|q| q.kind() == kind), "missing {kind}");
        }
    }

    #[tokio::test]
    async fn fetch_returns_all_questions_in_order() {
        let questions = BuiltinSource::new().fetch_questions().await.unwrap();
        let ids: Vec<u32> = questions.iter().map(Question::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert!(questions[5].grade(&"gradle".into()));
    }
}
