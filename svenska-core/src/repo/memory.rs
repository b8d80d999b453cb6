use crate::{ContainerId, QuizError, Vocabulary, VocabularyId};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use super::{FavoriteToggleService, SessionStore, VocabularySource};

#[derive(Default)]
pub struct MemoryVocabularyRepo {
    vocabularies: RwLock<BTreeMap<VocabularyId, Vocabulary>>,
}

impl MemoryVocabularyRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabularies(vocabularies: impl IntoIterator<Item = Vocabulary>) -> Self {
        let repo = Self::new();
        for v in vocabularies {
            repo.insert(v);
        }
        repo
    }

    pub fn insert(&self, vocabulary: Vocabulary) {
        self.vocabularies.write().insert(vocabulary.id, vocabulary);
    }

    pub fn get(&self, id: VocabularyId) -> Option<Vocabulary> {
        self.vocabularies.read().get(&id).cloned()
    }
}

#[async_trait]
impl VocabularySource for MemoryVocabularyRepo {
    async fn load(&self, container_id: Option<ContainerId>) -> Result<Vec<Vocabulary>, QuizError> {
        let m = self.vocabularies.read();
        let mut v: Vec<Vocabulary> = m.values().cloned().collect();
        if let Some(cid) = container_id {
            v.retain(|voc| voc.container_id == cid);
        }
        Ok(v)
    }
}

#[async_trait]
impl FavoriteToggleService for MemoryVocabularyRepo {
    async fn toggle(&self, vocabulary_id: VocabularyId, is_favorite: bool) -> Result<(), QuizError> {
        let mut m = self.vocabularies.write();
        let Some(v) = m.get_mut(&vocabulary_id) else {
            return Err(QuizError::NotFound("vocabulary"));
        };
        v.is_favorite = is_favorite;
        Ok(())
    }
}

/// Session store that only lives as long as the value itself. Sharing one
/// instance between two controllers simulates a process restart.
#[derive(Default)]
pub struct MemorySessionStore {
    slots: RwLock<HashMap<String, Value>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.slots.read().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, QuizError> {
        Ok(self.slots.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), QuizError> {
        let mut m = self.slots.write();
        match value {
            Some(v) => {
                m.insert(key.to_string(), v);
            }
            None => {
                m.remove(key);
            }
        }
        Ok(())
    }
}
