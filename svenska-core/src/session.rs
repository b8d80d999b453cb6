//! Translation quiz session: question sequence, grading and navigation,
//! published as an observable state.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::{
    AnswerInput, FavoriteToggleService, QuizError, QuizManager, QuizQuestion, QuizStatistics,
    QuizStrategy, SessionConfig, VocabularySource,
};

/// A command issued to the session. Failed commands are kept in the error
/// state so they can be run again.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionCommand<A> {
    Start,
    CheckAnswer(A),
    NextWord,
    ReturnToPreviousQuestion,
    ToggleFavorite(bool),
}

impl<A> SessionCommand<A> {
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Start => "start",
            SessionCommand::CheckAnswer(_) => "check_answer",
            SessionCommand::NextWord => "next_word",
            SessionCommand::ReturnToPreviousQuestion => "return_to_previous_question",
            SessionCommand::ToggleFavorite(_) => "toggle_favorite",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveQuiz<A, R> {
    pub question: QuizQuestion<A>,
    pub vocabulary_is_favorite: Option<bool>,
    pub can_return_to_previous: bool,
    pub user_answer: Option<A>,
    pub user_answer_result: Option<R>,
}

#[derive(Clone, Debug)]
pub enum QuizSessionState<A, R> {
    Loading,
    /// The source returned no vocabulary for this session.
    Empty,
    Error {
        error: Arc<QuizError>,
        retry: SessionCommand<A>,
    },
    Active(ActiveQuiz<A, R>),
    Finished {
        correct_answers: u32,
        total_questions: u32,
        score: f32,
    },
}

impl<A, R> QuizSessionState<A, R> {
    pub fn as_active(&self) -> Option<&ActiveQuiz<A, R>> {
        match self {
            QuizSessionState::Active(active) => Some(active),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QuizSessionState::Error { .. })
    }
}

struct SessionInner<A, R> {
    manager: QuizManager,
    // Last question view; survives an error so the failed command can rerun.
    active: Option<ActiveQuiz<A, R>>,
}

pub type SessionState<S> =
    QuizSessionState<<S as QuizStrategy>::Answer, <S as QuizStrategy>::Result>;

pub struct QuizSessionController<S: QuizStrategy> {
    strategy: S,
    source: Arc<dyn VocabularySource>,
    favorites: Arc<dyn FavoriteToggleService>,
    config: SessionConfig,
    inner: Mutex<SessionInner<S::Answer, S::Result>>,
    state: watch::Sender<SessionState<S>>,
    input: watch::Sender<S::Input>,
}

impl<S: QuizStrategy> QuizSessionController<S> {
    pub fn new(
        strategy: S,
        source: Arc<dyn VocabularySource>,
        favorites: Arc<dyn FavoriteToggleService>,
        config: SessionConfig,
    ) -> Self {
        let (state, _) = watch::channel(QuizSessionState::Loading);
        let (input, _) = watch::channel(S::Input::default());
        Self {
            strategy,
            source,
            favorites,
            config,
            inner: Mutex::new(SessionInner {
                manager: QuizManager::new(),
                active: None,
            }),
            state,
            input,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState<S>> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState<S> {
        self.state.borrow().clone()
    }

    pub fn subscribe_input(&self) -> watch::Receiver<S::Input> {
        self.input.subscribe()
    }

    pub fn input(&self) -> S::Input {
        self.input.borrow().clone()
    }

    pub fn edit_input(&self, edit: impl FnOnce(&mut S::Input)) {
        self.input.send_modify(edit);
    }

    pub fn statistics(&self) -> QuizStatistics {
        self.inner.lock().manager.statistics()
    }

    /// Loads the vocabulary and shows the first question.
    pub async fn start(&self) {
        self.launch_safely(SessionCommand::Start).await;
    }

    pub async fn check_answer(&self, answer: S::Answer) {
        if self.blocked_by_error("check_answer") {
            return;
        }
        self.launch_safely(SessionCommand::CheckAnswer(answer)).await;
    }

    /// Checks whatever is currently typed into the input.
    pub async fn check_input(&self) {
        let answer = self.input.borrow().to_user_answer();
        self.check_answer(answer).await;
    }

    pub async fn next_word(&self) {
        if self.blocked_by_error("next_word") {
            return;
        }
        self.launch_safely(SessionCommand::NextWord).await;
    }

    pub async fn return_to_previous_question(&self) {
        if self.blocked_by_error("return_to_previous_question") {
            return;
        }
        self.launch_safely(SessionCommand::ReturnToPreviousQuestion).await;
    }

    pub async fn toggle_favorite(&self, is_favorite: bool) {
        if self.blocked_by_error("toggle_favorite") {
            return;
        }
        self.launch_safely(SessionCommand::ToggleFavorite(is_favorite)).await;
    }

    /// Runs the command that put the session into the error state again.
    pub async fn retry(&self) {
        let command = match &*self.state.borrow() {
            QuizSessionState::Error { retry, .. } => retry.clone(),
            _ => return,
        };
        tracing::debug!(command = command.name(), "retrying quiz command");
        self.launch_safely(command).await;
    }

    fn blocked_by_error(&self, command: &'static str) -> bool {
        let blocked = self.state.borrow().is_error();
        if blocked {
            tracing::debug!(command, "ignoring command while session is in error");
        }
        blocked
    }

    async fn launch_safely(&self, command: SessionCommand<S::Answer>) {
        tracing::debug!(command = command.name(), "quiz command");
        if let Err(e) = self.run(command.clone()).await {
            tracing::warn!(command = command.name(), error = %e, "quiz command failed");
            self.state.send_replace(QuizSessionState::Error {
                error: Arc::new(e),
                retry: command,
            });
        }
    }

    async fn run(&self, command: SessionCommand<S::Answer>) -> Result<(), QuizError> {
        match command {
            SessionCommand::Start => self.load().await,
            SessionCommand::CheckAnswer(answer) => {
                self.grade(answer);
                Ok(())
            }
            SessionCommand::NextWord => {
                self.advance();
                Ok(())
            }
            SessionCommand::ReturnToPreviousQuestion => {
                self.step_back();
                Ok(())
            }
            SessionCommand::ToggleFavorite(is_favorite) => self.persist_favorite(is_favorite).await,
        }
    }

    async fn load(&self) -> Result<(), QuizError> {
        let vocabularies = self.source.load(self.config.container_id).await?;
        let count = vocabularies.len();
        self.reset_input();

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        inner.manager.start(vocabularies, self.config.shuffle_words);
        inner.active = self.fresh_question(&inner.manager);
        match &inner.active {
            Some(active) => {
                tracing::info!(questions = count, container = ?self.config.container_id, "quiz session started");
                self.state.send_replace(QuizSessionState::Active(active.clone()));
            }
            None => {
                tracing::info!(container = ?self.config.container_id, "no vocabulary for quiz session");
                self.state.send_replace(QuizSessionState::Empty);
            }
        }
        Ok(())
    }

    fn grade(&self, answer: S::Answer) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some(active) = inner.active.as_mut() else {
            tracing::debug!("no active question to check");
            return;
        };
        let result = self.strategy.validate_answer(&active.question, &answer);
        inner.manager.record_answer(self.strategy.is_correct(&result));
        active.user_answer = Some(answer);
        active.user_answer_result = Some(result);
        self.state.send_replace(QuizSessionState::Active(active.clone()));
    }

    fn advance(&self) {
        self.reset_input();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if inner.active.is_none() {
            return;
        }

        if inner.manager.go_to_next_question() {
            inner.active = self.fresh_question(&inner.manager);
            if let Some(active) = &inner.active {
                self.state.send_replace(QuizSessionState::Active(active.clone()));
            }
        } else {
            let stats = inner.manager.statistics();
            inner.active = None;
            tracing::info!(
                correct = stats.correct_answers,
                total = stats.total_questions,
                "quiz session finished"
            );
            self.state.send_replace(QuizSessionState::Finished {
                correct_answers: stats.correct_answers,
                total_questions: stats.total_questions,
                score: stats.score(),
            });
        }
    }

    fn step_back(&self) {
        self.reset_input();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if inner.active.is_none() {
            return;
        }
        inner.manager.go_to_previous_question();
        // Going back never restores the earlier answer.
        inner.active = self.fresh_question(&inner.manager);
        if let Some(active) = &inner.active {
            self.state.send_replace(QuizSessionState::Active(active.clone()));
        }
    }

    async fn persist_favorite(&self, is_favorite: bool) -> Result<(), QuizError> {
        let vocabulary_id = {
            let inner = self.inner.lock();
            match &inner.active {
                Some(active) => active.question.vocabulary_id,
                None => return Ok(()),
            }
        };

        self.favorites.toggle(vocabulary_id, is_favorite).await?;

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        inner.manager.set_favorite(vocabulary_id, is_favorite);
        if let Some(active) = inner.active.as_mut() {
            if active.question.vocabulary_id == vocabulary_id {
                active.vocabulary_is_favorite = Some(is_favorite);
            }
            self.state.send_replace(QuizSessionState::Active(active.clone()));
        }
        Ok(())
    }

    fn fresh_question(&self, manager: &QuizManager) -> Option<ActiveQuiz<S::Answer, S::Result>> {
        let question = manager.current_question(&self.strategy)?;
        Some(ActiveQuiz {
            question,
            vocabulary_is_favorite: manager.current_vocabulary_is_favorite(),
            can_return_to_previous: manager.has_previous_question(),
            user_answer: None,
            user_answer_result: None,
        })
    }

    fn reset_input(&self) {
        self.input.send_replace(S::Input::default());
    }
}
