//! Word-group quiz: sort nouns into their inflection subgroup.
//!
//! The shuffle seed, the position and the answer given for the current noun
//! live in a [`SessionStore`], so a controller rebuilt on the same store after
//! the process was killed shows exactly what the previous one showed.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tokio::sync::watch;

use crate::repo::{load_saved, save_value};
use crate::{
    ContainerId, NounSubgroup, QuizError, RandomSource, SessionStore, Vocabulary, VocabularySource,
};

pub const SHUFFLE_SEED_KEY: &str = "quiz_shuffle_seed";
pub const CURRENT_INDEX_KEY: &str = "quiz_current_index";
pub const USER_SELECTED_SUBGROUP_KEY: &str = "user_selected_subgroup";
pub const USER_ANSWER_CORRECT_KEY: &str = "user_answer_correct";

#[derive(Clone, Debug, PartialEq)]
pub struct QuizItemState {
    pub progress: usize,
    pub progress_goal: usize,
    pub vocabulary: Vocabulary,
    pub correct_subgroup: NounSubgroup,
    pub selected_subgroup: Option<NounSubgroup>,
    pub user_answer_correct: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassificationCommand {
    Start,
    SelectSubgroup(NounSubgroup),
    Check,
    Next,
}

impl ClassificationCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ClassificationCommand::Start => "start",
            ClassificationCommand::SelectSubgroup(_) => "select_subgroup",
            ClassificationCommand::Check => "check",
            ClassificationCommand::Next => "next",
        }
    }
}

#[derive(Clone, Debug)]
pub enum GroupClassificationState {
    Loading,
    Empty,
    Completed,
    Error {
        error: Arc<QuizError>,
        retry: ClassificationCommand,
    },
    QuizItem(QuizItemState),
}

impl GroupClassificationState {
    pub fn as_item(&self) -> Option<&QuizItemState> {
        match self {
            GroupClassificationState::QuizItem(item) => Some(item),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<usize> {
        self.as_item().map(|i| i.progress)
    }

    pub fn progress_goal(&self) -> Option<usize> {
        self.as_item().map(|i| i.progress_goal)
    }
}

/// Special and undefined count as one bucket; everything else must match exactly.
pub fn subgroup_matches(expected: NounSubgroup, selected: Option<NounSubgroup>) -> bool {
    match selected {
        None => false,
        Some(selected) if expected.is_irregular() => selected.is_irregular(),
        Some(selected) => selected == expected,
    }
}

#[derive(Default)]
struct ClassificationInner {
    vocabularies: Vec<Vocabulary>,
    current_index: usize,
    item: Option<QuizItemState>,
}

impl ClassificationInner {
    fn item_at(
        &self,
        index: usize,
        selected_subgroup: Option<NounSubgroup>,
        user_answer_correct: Option<bool>,
    ) -> Option<QuizItemState> {
        let vocabulary = self.vocabularies.get(index)?;
        let correct_subgroup = vocabulary.word_group.noun_subgroup()?;
        Some(QuizItemState {
            progress: index,
            progress_goal: self.vocabularies.len(),
            vocabulary: vocabulary.clone(),
            correct_subgroup,
            selected_subgroup,
            user_answer_correct,
        })
    }
}

pub struct GroupClassificationController {
    source: Arc<dyn VocabularySource>,
    store: Arc<dyn SessionStore>,
    random: Arc<dyn RandomSource>,
    container_id: Option<ContainerId>,
    inner: Mutex<ClassificationInner>,
    state: watch::Sender<GroupClassificationState>,
}

impl GroupClassificationController {
    pub fn new(
        source: Arc<dyn VocabularySource>,
        store: Arc<dyn SessionStore>,
        random: Arc<dyn RandomSource>,
        container_id: Option<ContainerId>,
    ) -> Self {
        let (state, _) = watch::channel(GroupClassificationState::Loading);
        Self {
            source,
            store,
            random,
            container_id,
            inner: Mutex::new(ClassificationInner::default()),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<GroupClassificationState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> GroupClassificationState {
        self.state.borrow().clone()
    }

    /// Loads the nouns and shows the saved position, with its saved answer.
    pub async fn start(&self) {
        self.launch_safely(ClassificationCommand::Start).await;
    }

    pub async fn select_subgroup(&self, subgroup: NounSubgroup) {
        if self.blocked_by_error("select_subgroup") {
            return;
        }
        self.launch_safely(ClassificationCommand::SelectSubgroup(subgroup)).await;
    }

    pub async fn check(&self) {
        if self.blocked_by_error("check") {
            return;
        }
        self.launch_safely(ClassificationCommand::Check).await;
    }

    pub async fn next(&self) {
        if self.blocked_by_error("next") {
            return;
        }
        self.launch_safely(ClassificationCommand::Next).await;
    }

    pub async fn retry(&self) {
        let command = match &*self.state.borrow() {
            GroupClassificationState::Error { retry, .. } => *retry,
            _ => return,
        };
        tracing::debug!(command = command.name(), "retrying word group command");
        self.launch_safely(command).await;
    }

    fn blocked_by_error(&self, command: &'static str) -> bool {
        let blocked = matches!(*self.state.borrow(), GroupClassificationState::Error { .. });
        if blocked {
            tracing::debug!(command, "ignoring command while word group quiz is in error");
        }
        blocked
    }

    async fn launch_safely(&self, command: ClassificationCommand) {
        tracing::debug!(command = command.name(), "word group command");
        let outcome = match command {
            ClassificationCommand::Start => self.load().await,
            ClassificationCommand::SelectSubgroup(subgroup) => self.select(subgroup).await,
            ClassificationCommand::Check => self.grade().await,
            ClassificationCommand::Next => self.advance().await,
        };
        if let Err(e) = outcome {
            tracing::warn!(command = command.name(), error = %e, "word group command failed");
            self.state.send_replace(GroupClassificationState::Error {
                error: Arc::new(e),
                retry: command,
            });
        }
    }

    async fn shuffle_seed(&self) -> Result<u64, QuizError> {
        let store = self.store.as_ref();
        if let Some(seed) = load_saved::<u64>(store, SHUFFLE_SEED_KEY).await? {
            return Ok(seed);
        }
        let seed = self.random.next_u64();
        save_value(store, SHUFFLE_SEED_KEY, Some(&seed)).await?;
        Ok(seed)
    }

    async fn load(&self) -> Result<(), QuizError> {
        let store = self.store.as_ref();
        let seed = self.shuffle_seed().await?;
        let current_index = load_saved::<usize>(store, CURRENT_INDEX_KEY)
            .await?
            .unwrap_or(0);

        let mut nouns: Vec<Vocabulary> = self
            .source
            .load(self.container_id)
            .await?
            .into_iter()
            .filter(|v| v.word_group.is_noun())
            .collect();

        if nouns.is_empty() {
            *self.inner.lock() = ClassificationInner::default();
            tracing::info!(container = ?self.container_id, "no nouns for word group quiz");
            self.state.send_replace(GroupClassificationState::Empty);
            return Ok(());
        }

        // The seed alone must reproduce the order, whatever order the source uses.
        nouns.sort_by_key(|v| v.id);
        nouns.shuffle(&mut StdRng::seed_from_u64(seed));

        let selected = load_saved::<NounSubgroup>(store, USER_SELECTED_SUBGROUP_KEY).await?;
        let correct = load_saved::<bool>(store, USER_ANSWER_CORRECT_KEY).await?;

        let mut inner = self.inner.lock();
        inner.vocabularies = nouns;
        inner.current_index = current_index;
        inner.item = inner.item_at(current_index, selected, correct);
        tracing::info!(
            nouns = inner.vocabularies.len(),
            index = current_index,
            resumed = selected.is_some() || current_index > 0,
            "word group quiz loaded"
        );
        self.publish_current(&inner);
        Ok(())
    }

    async fn select(&self, subgroup: NounSubgroup) -> Result<(), QuizError> {
        let has_item = self.inner.lock().item.is_some();
        if !has_item {
            return Ok(());
        }
        let store = self.store.as_ref();
        save_value(store, USER_SELECTED_SUBGROUP_KEY, Some(&subgroup)).await?;
        // A verdict only ever describes the visible selection.
        save_value::<bool>(store, USER_ANSWER_CORRECT_KEY, None).await?;

        let mut inner = self.inner.lock();
        if let Some(item) = inner.item.as_mut() {
            item.selected_subgroup = Some(subgroup);
            item.user_answer_correct = None;
        }
        self.publish_current(&inner);
        Ok(())
    }

    async fn grade(&self) -> Result<(), QuizError> {
        let pending = {
            let inner = self.inner.lock();
            inner
                .item
                .as_ref()
                .map(|item| (item.correct_subgroup, item.selected_subgroup))
        };
        let Some((expected, selected)) = pending else {
            return Ok(());
        };

        let correct = subgroup_matches(expected, selected);
        save_value(self.store.as_ref(), USER_ANSWER_CORRECT_KEY, Some(&correct)).await?;

        let mut inner = self.inner.lock();
        if let Some(item) = inner.item.as_mut() {
            item.user_answer_correct = Some(correct);
        }
        self.publish_current(&inner);
        Ok(())
    }

    async fn advance(&self) -> Result<(), QuizError> {
        let next_index = {
            let inner = self.inner.lock();
            if inner.item.is_none() {
                return Ok(());
            }
            inner.current_index + 1
        };

        let store = self.store.as_ref();
        save_value::<NounSubgroup>(store, USER_SELECTED_SUBGROUP_KEY, None).await?;
        save_value::<bool>(store, USER_ANSWER_CORRECT_KEY, None).await?;
        save_value(store, CURRENT_INDEX_KEY, Some(&next_index)).await?;

        let mut inner = self.inner.lock();
        inner.current_index = next_index;
        inner.item = inner.item_at(next_index, None, None);
        if inner.item.is_none() {
            tracing::info!(nouns = inner.vocabularies.len(), "word group quiz completed");
        }
        self.publish_current(&inner);
        Ok(())
    }

    fn publish_current(&self, inner: &ClassificationInner) {
        let state = match &inner.item {
            Some(item) => GroupClassificationState::QuizItem(item.clone()),
            None => GroupClassificationState::Completed,
        };
        self.state.send_replace(state);
    }
}
