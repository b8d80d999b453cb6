use crate::{ContainerId, QuizError, Vocabulary, VocabularyId};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub mod memory;

#[async_trait]
pub trait VocabularySource: Send + Sync {
    /// All entries of a container, or of every container when `None`.
    async fn load(&self, container_id: Option<ContainerId>) -> Result<Vec<Vocabulary>, QuizError>;
}

#[async_trait]
pub trait FavoriteToggleService: Send + Sync {
    async fn toggle(&self, vocabulary_id: VocabularyId, is_favorite: bool) -> Result<(), QuizError>;
}

/// Passes on only the entries that carry endings to ask for.
pub struct WithEndingsOnly {
    inner: Arc<dyn VocabularySource>,
}

impl WithEndingsOnly {
    pub fn new(inner: Arc<dyn VocabularySource>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl VocabularySource for WithEndingsOnly {
    async fn load(&self, container_id: Option<ContainerId>) -> Result<Vec<Vocabulary>, QuizError> {
        let mut v = self.inner.load(container_id).await?;
        v.retain(|voc| !voc.ending.trim().is_empty());
        Ok(v)
    }
}

/// Named key/value slots that outlive the process.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, QuizError>;
    /// `None` removes the slot.
    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), QuizError>;
}

pub async fn load_saved<T: DeserializeOwned>(
    store: &dyn SessionStore,
    key: &str,
) -> Result<Option<T>, QuizError> {
    match store.get(key).await? {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(serde_json::from_value(v)?)),
    }
}

pub async fn save_value<T: Serialize + Sync>(
    store: &dyn SessionStore,
    key: &str,
    value: Option<&T>,
) -> Result<(), QuizError> {
    let value = value.map(serde_json::to_value).transpose()?;
    store.set(key, value).await
}
