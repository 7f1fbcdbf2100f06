//! Shared session handle with snapshot publishing.
//!
//! [`SessionHandle`] serializes all mutations of a [`QuizSession`] behind a
//! mutex and publishes an immutable [`SessionSnapshot`] after every accepted
//! mutation. Snapshots are published while the lock is held, so subscribers
//! see them in mutation order. A slow subscriber only sees the latest one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tokio::sync::watch;

use crate::error::SessionError;
use crate::model::{Answer, Question, QuestionId};
use crate::report::QuizSummary;
use crate::session::{Outcome, QuizSession, SessionSnapshot, SessionStatus};
use crate::traits::QuestionSource;

/// Single-writer, many-reader access to one quiz session.
pub struct SessionHandle {
    session: Mutex<QuizSession>,
    snapshots: watch::Sender<Arc<SessionSnapshot>>,
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHandle {
    /// Wrap a fresh, unloaded session.
    pub fn new() -> Self {
        Self::from_session(QuizSession::new())
    }

    pub fn from_session(session: QuizSession) -> Self {
        let (snapshots, _) = watch::channel(Arc::new(session.snapshot()));
        Self {
            session: Mutex::new(session),
            snapshots,
        }
    }

    /// The latest published snapshot. Does not take the write lock.
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Receive every published snapshot from now on (conflated).
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionSnapshot>> {
        self.snapshots.subscribe()
    }

    /// Fetch questions from `source` and load them.
    ///
    /// While the fetch is in flight the published snapshot has `loading` set.
    /// On failure the error is recorded in `load_error` and the session stays
    /// unloaded. Only one fetch may be in flight at a time and only the first
    /// successful delivery is loaded. Returns the number of questions loaded.
    pub async fn load_from(&self, source: &dyn QuestionSource) -> Result<usize> {
        self.mutate(QuizSession::begin_load)?;
        tracing::debug!(source = source.name(), "fetching questions");

        let questions = match source.fetch_questions().await {
            Ok(questions) => questions,
            Err(e) => {
                let message = format!("{e:#}");
                tracing::error!(source = source.name(), "failed to fetch questions: {message}");
                // Ignored when questions were loaded directly in the meantime.
                let _ = self.mutate(|s| s.fail_load(message));
                return Err(e.context(format!("question source '{}' failed", source.name())));
            }
        };

        let count = questions.len();
        match self.mutate(|s| s.load(questions)) {
            Ok(()) => Ok(count),
            Err(SessionError::AlreadyLoaded) => {
                tracing::debug!(source = source.name(), "late delivery ignored");
                Err(SessionError::AlreadyLoaded.into())
            }
            Err(e) => {
                let _ = self.mutate(|s| s.fail_load(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Load questions directly, without a source.
    pub fn load(&self, questions: Vec<Question>) -> Result<(), SessionError> {
        self.mutate(|s| s.load(questions))
    }

    /// See [`QuizSession::submit_answer`].
    pub fn submit_answer(
        &self,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<Outcome, SessionError> {
        self.mutate(|s| s.submit_answer(question_id, answer))
    }

    /// See [`QuizSession::advance`].
    pub fn advance(&self) -> Result<SessionStatus, SessionError> {
        self.mutate(QuizSession::advance)
    }

    pub fn summary(&self) -> QuizSummary {
        self.lock().summary()
    }

    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut QuizSession) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut session = self.lock();
        let result = op(&mut session)?;
        self.snapshots.send_replace(Arc::new(session.snapshot()));
        Ok(result)
    }

    fn lock(&self) -> MutexGuard<'_, QuizSession> {
        // The session is never left half-updated, so a poisoned lock is still usable.
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use tokio::sync::{oneshot, Mutex as AsyncMutex};

    fn questions() -> Vec<Question> {
        vec![
            Question::multiple_choice(1, "Capital of France?", ["London", "Paris"], "Paris")
                .unwrap(),
            Question::true_false(2, "Rust is memory safe.", true).unwrap(),
        ]
    }

    struct FixedSource(Vec<Question>);

    #[async_trait]
    impl QuestionSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_questions(&self) -> anyhow::Result<Vec<Question>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl QuestionSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_questions(&self) -> anyhow::Result<Vec<Question>> {
            anyhow::bail!("connection refused")
        }
    }

    /// Delivers only once the test releases it.
    struct GatedSource {
        gate: AsyncMutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl QuestionSource for GatedSource {
        fn name(&self) -> &str {
            "gated"
        }

        async fn fetch_questions(&self) -> anyhow::Result<Vec<Question>> {
            if let Some(gate) = self.gate.lock().await.take() {
                gate.await?;
            }
            Ok(questions())
        }
    }

    #[tokio::test]
    async fn load_from_source() {
        let handle = SessionHandle::new();
        assert_eq!(handle.snapshot().status, SessionStatus::Unloaded);

        let count = handle.load_from(&FixedSource(questions())).await.unwrap();
        assert_eq!(count, 2);

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.status, SessionStatus::AwaitingAnswer);
        assert_eq!(snapshot.index, 0);
        assert_eq!(snapshot.score, 0);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn only_first_delivery_loads() {
        let handle = SessionHandle::new();
        handle.load_from(&FixedSource(questions())).await.unwrap();

        let other = vec![Question::true_false(9, "Other set", false).unwrap()];
        let err = handle.load_from(&FixedSource(other)).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::AlreadyLoaded)
        );
        assert_eq!(handle.snapshot().total, 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_session_unloaded() {
        let handle = SessionHandle::new();
        let err = handle.load_from(&FailingSource).await.unwrap_err();
        assert!(format!("{err:#}").contains("connection refused"));

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Unloaded);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.load_error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn loading_flag_is_published_while_fetching() {
        let (release, gate) = oneshot::channel();
        let source = GatedSource {
            gate: AsyncMutex::new(Some(gate)),
        };
        let handle = Arc::new(SessionHandle::new());
        let mut updates = handle.subscribe();

        let task = {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.load_from(&source).await })
        };

        updates.changed().await.unwrap();
        assert!(updates.borrow_and_update().loading);

        release.send(()).unwrap();
        assert_eq!(task.await.unwrap().unwrap(), 2);
        assert!(!handle.snapshot().loading);
        assert_eq!(handle.snapshot().status, SessionStatus::AwaitingAnswer);
    }

    #[tokio::test]
    async fn concurrent_fetch_keeps_loading_flag() {
        let (release, gate) = oneshot::channel();
        let gated = GatedSource {
            gate: AsyncMutex::new(Some(gate)),
        };
        let handle = Arc::new(SessionHandle::new());
        let mut updates = handle.subscribe();

        let task = {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.load_from(&gated).await })
        };
        updates.changed().await.unwrap();
        assert!(updates.borrow_and_update().loading);

        let err = handle.load_from(&FailingSource).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::LoadInProgress)
        );
        assert!(handle.snapshot().loading);
        assert!(handle.snapshot().load_error.is_none());

        release.send(()).unwrap();
        assert_eq!(task.await.unwrap().unwrap(), 2);
        assert!(!handle.snapshot().loading);
    }

    #[tokio::test]
    async fn invalid_delivery_is_recorded_as_load_error() {
        let handle = SessionHandle::new();
        let broken = Question::TrueFalse {
            id: 1,
            stem: "  ".into(),
            correct_answer: true,
        };
        let err = handle.load_from(&FixedSource(vec![broken])).await.unwrap_err();
        assert!(err.to_string().contains("stem is empty"));

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Unloaded);
        assert!(!snapshot.loading);
        assert!(snapshot.load_error.is_some());
        assert_eq!(handle.load_from(&FixedSource(questions())).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn subscribers_see_snapshots_in_order() {
        let handle = SessionHandle::new();
        handle.load(questions()).unwrap();
        let mut updates = handle.subscribe();

        handle.submit_answer(1, Answer::from("Paris")).unwrap();
        updates.changed().await.unwrap();
        let revealed = updates.borrow_and_update().clone();
        assert_eq!(revealed.status, SessionStatus::AnswerRevealed);
        assert_eq!(revealed.score, 1);

        handle.advance().unwrap();
        updates.changed().await.unwrap();
        let next = updates.borrow_and_update().clone();
        assert_eq!(next.index, 1);
        assert_eq!(next.outcome, None);
    }

    #[tokio::test]
    async fn rejected_calls_publish_nothing() {
        let handle = SessionHandle::new();
        handle.load(questions()).unwrap();
        let updates = handle.subscribe();

        assert_eq!(handle.advance(), Err(SessionError::NotRevealed));
        assert_eq!(
            handle.submit_answer(42, Answer::from("Paris")),
            Err(SessionError::UnknownQuestion(42))
        );
        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_submits_count_once() {
        let handle = Arc::new(SessionHandle::new());
        handle.load(questions()).unwrap();

        let tasks = (0..16).map(|_| {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.submit_answer(1, Answer::from("Paris")) })
        });
        let results = futures::future::join_all(tasks).await;

        let accepted = results
            .into_iter()
            .map(|r| r.unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(handle.snapshot().score, 1);
    }

    #[tokio::test]
    async fn full_run_through_handle() {
        let handle = SessionHandle::new();
        handle.load(questions()).unwrap();

        handle.submit_answer(1, Answer::from("Paris")).unwrap();
        handle.advance().unwrap();
        handle.submit_answer(2, Answer::Boolean(false)).unwrap();
        assert_eq!(handle.advance(), Ok(SessionStatus::Complete));

        let snapshot = handle.snapshot();
        assert!(snapshot.complete);
        assert_eq!(snapshot.score, 1);
        assert!(snapshot.current_question.is_none());
        assert_eq!(handle.summary().answers.len(), 2);
    }
}
