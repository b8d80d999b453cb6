use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use svenska_core::{
    ClassificationCommand, GroupClassificationController, GroupClassificationState,
    MemorySessionStore, MemoryVocabularyRepo, NounSubgroup, QuizError, QuizItemState, SeededRandom,
    SessionStore, VerbSubgroup, Vocabulary, WordGroup, CURRENT_INDEX_KEY, SHUFFLE_SEED_KEY,
    USER_ANSWER_CORRECT_KEY, USER_SELECTED_SUBGROUP_KEY,
};

fn noun(id: u32, subgroup: NounSubgroup) -> Vocabulary {
    Vocabulary::new(id, 1, format!("ord{id}"), format!("word{id}"))
        .with_word_group(WordGroup::Noun(subgroup))
}

fn nouns() -> Arc<MemoryVocabularyRepo> {
    Arc::new(MemoryVocabularyRepo::with_vocabularies([
        noun(1, NounSubgroup::Ar),
        noun(2, NounSubgroup::Or),
        noun(3, NounSubgroup::Special),
        noun(4, NounSubgroup::R),
        Vocabulary::new(5, 1, "springa", "run").with_word_group(WordGroup::Verb(VerbSubgroup::Group4Special)),
    ]))
}

fn controller(
    repo: Arc<MemoryVocabularyRepo>,
    store: Arc<dyn SessionStore>,
) -> GroupClassificationController {
    GroupClassificationController::new(repo, store, Arc::new(SeededRandom::new(11)), None)
}

fn item(c: &GroupClassificationController) -> QuizItemState {
    c.state().as_item().cloned().expect("quiz item")
}

#[tokio::test]
async fn no_nouns_is_empty() {
    let repo = Arc::new(MemoryVocabularyRepo::with_vocabularies([Vocabulary::new(1, 1, "stor", "big")
        .with_word_group(WordGroup::Adjective)]));
    let c = controller(repo, Arc::new(MemorySessionStore::new()));
    assert!(matches!(c.state(), GroupClassificationState::Loading));
    c.start().await;
    assert!(matches!(c.state(), GroupClassificationState::Empty));
}

#[tokio::test]
async fn fresh_start_shows_blank_first_item() {
    let c = controller(nouns(), Arc::new(MemorySessionStore::new()));
    c.start().await;
    let first = item(&c);
    assert_eq!(first.progress, 0);
    assert_eq!(first.progress_goal, 4);
    assert_eq!(first.selected_subgroup, None);
    assert_eq!(first.user_answer_correct, None);
    assert_eq!(first.vocabulary.word_group.noun_subgroup(), Some(first.correct_subgroup));
    assert_eq!(c.state().progress(), Some(0));
    assert_eq!(c.state().progress_goal(), Some(4));
}

#[tokio::test]
async fn irregular_answers_share_a_bucket() {
    let repo = Arc::new(MemoryVocabularyRepo::with_vocabularies([noun(1, NounSubgroup::Special)]));
    let c = controller(repo, Arc::new(MemorySessionStore::new()));
    c.start().await;

    c.select_subgroup(NounSubgroup::Special).await;
    c.check().await;
    assert_eq!(item(&c).user_answer_correct, Some(true));

    c.select_subgroup(NounSubgroup::Undefined).await;
    c.check().await;
    assert_eq!(item(&c).user_answer_correct, Some(true));

    c.select_subgroup(NounSubgroup::Or).await;
    c.check().await;
    assert_eq!(item(&c).user_answer_correct, Some(false));
}

#[tokio::test]
async fn check_without_selection_is_wrong() {
    let repo = Arc::new(MemoryVocabularyRepo::with_vocabularies([noun(1, NounSubgroup::Er)]));
    let c = controller(repo, Arc::new(MemorySessionStore::new()));
    c.start().await;
    c.check().await;
    assert_eq!(item(&c).user_answer_correct, Some(false));
}

#[tokio::test]
async fn reselecting_clears_the_verdict() {
    let repo = Arc::new(MemoryVocabularyRepo::with_vocabularies([noun(1, NounSubgroup::Er)]));
    let store = Arc::new(MemorySessionStore::new());
    let c = controller(repo, store.clone());
    c.start().await;
    c.select_subgroup(NounSubgroup::Er).await;
    c.check().await;
    assert_eq!(item(&c).user_answer_correct, Some(true));

    c.select_subgroup(NounSubgroup::Ar).await;
    let now = item(&c);
    assert_eq!(now.selected_subgroup, Some(NounSubgroup::Ar));
    assert_eq!(now.user_answer_correct, None);
    assert!(!store.snapshot().contains_key(USER_ANSWER_CORRECT_KEY));
}

#[tokio::test]
async fn restores_checked_item_after_process_death() {
    let repo = nouns();
    let store = Arc::new(MemorySessionStore::new());

    let before = {
        let c = controller(repo.clone(), store.clone());
        c.start().await;
        c.select_subgroup(NounSubgroup::R).await;
        c.check().await;
        item(&c)
    };
    assert_eq!(before.selected_subgroup, Some(NounSubgroup::R));
    assert!(before.user_answer_correct.is_some());

    // A different random source: the stored seed must win.
    let revived = GroupClassificationController::new(
        repo,
        store,
        Arc::new(SeededRandom::new(999)),
        None,
    );
    revived.start().await;
    assert_eq!(item(&revived), before);
}

#[tokio::test]
async fn restores_position_after_next() {
    let repo = nouns();
    let store = Arc::new(MemorySessionStore::new());

    let c = controller(repo.clone(), store.clone());
    c.start().await;
    let first = item(&c);
    c.select_subgroup(NounSubgroup::R).await;
    c.check().await;
    c.next().await;
    let before = item(&c);
    assert_eq!(before.progress, 1);
    assert_eq!(before.selected_subgroup, None);
    assert_eq!(before.user_answer_correct, None);
    assert_ne!(first.vocabulary, before.vocabulary);

    let revived = controller(repo, store);
    revived.start().await;
    assert_eq!(item(&revived), before);
}

#[tokio::test]
async fn seed_is_generated_once_and_persisted() {
    let store = Arc::new(MemorySessionStore::new());
    let c = controller(nouns(), store.clone());
    c.start().await;
    let seed = store.snapshot().get(SHUFFLE_SEED_KEY).cloned().expect("seed stored");
    assert!(seed.is_u64());

    c.start().await;
    assert_eq!(store.snapshot().get(SHUFFLE_SEED_KEY), Some(&seed));
}

#[tokio::test]
async fn next_runs_to_completed() {
    let store = Arc::new(MemorySessionStore::new());
    let c = controller(nouns(), store.clone());
    c.start().await;

    let mut seen = Vec::new();
    for expected_progress in 0..4 {
        let current = item(&c);
        assert_eq!(current.progress, expected_progress);
        seen.push(current.vocabulary.id);
        c.next().await;
    }
    assert!(matches!(c.state(), GroupClassificationState::Completed));
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4]);
    assert_eq!(store.snapshot().get(CURRENT_INDEX_KEY), Some(&Value::from(4u64)));

    // Completed survives a restart too.
    let revived = controller(nouns(), store);
    revived.start().await;
    assert!(matches!(revived.state(), GroupClassificationState::Completed));
}

#[tokio::test]
async fn next_overwrites_saved_answer() {
    let store = Arc::new(MemorySessionStore::new());
    let c = controller(nouns(), store.clone());
    c.start().await;
    c.select_subgroup(NounSubgroup::Ar).await;
    c.check().await;
    assert!(store.snapshot().contains_key(USER_SELECTED_SUBGROUP_KEY));

    c.next().await;
    let slots = store.snapshot();
    assert!(!slots.contains_key(USER_SELECTED_SUBGROUP_KEY));
    assert!(!slots.contains_key(USER_ANSWER_CORRECT_KEY));
}

/// Store whose writes fail a fixed number of times.
struct BrokenStore {
    failures: AtomicUsize,
    inner: MemorySessionStore,
}

#[async_trait]
impl SessionStore for BrokenStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, QuizError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), QuizError> {
        let fail = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(QuizError::Storage("write refused".into()));
        }
        self.inner.set(key, value).await
    }
}

#[tokio::test]
async fn store_failure_is_retryable() {
    let store = Arc::new(BrokenStore {
        failures: AtomicUsize::new(0),
        inner: MemorySessionStore::new(),
    });
    let c = controller(nouns(), store.clone());
    c.start().await;
    let first = item(&c);

    store.failures.store(1, Ordering::SeqCst);
    c.select_subgroup(NounSubgroup::N).await;
    match c.state() {
        GroupClassificationState::Error { error, retry } => {
            assert!(matches!(*error, QuizError::Storage(_)));
            assert_eq!(retry, ClassificationCommand::SelectSubgroup(NounSubgroup::N));
        }
        other => panic!("expected error, got {other:?}"),
    }

    // Ignored until retried.
    c.next().await;
    assert!(matches!(c.state(), GroupClassificationState::Error { .. }));

    c.retry().await;
    let now = item(&c);
    assert_eq!(now.vocabulary, first.vocabulary);
    assert_eq!(now.selected_subgroup, Some(NounSubgroup::N));
}
