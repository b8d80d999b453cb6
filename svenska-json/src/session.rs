use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use svenska_core::{QuizError, SessionStore};
use tokio::task;

use crate::{storage_error, write_atomic};

const SESSION_VERSION: u32 = 1;

#[derive(Clone, Default, Serialize, Deserialize)]
struct SessionImage {
    version: u32,
    #[serde(default)]
    slots: Map<String, Value>,
}

/// Session slots in a small JSON file. Every `set` is on disk before it returns.
pub struct JsonSessionStore {
    path: PathBuf,
    slots: Mutex<Map<String, Value>>,
}

impl JsonSessionStore {
    pub async fn open(path: PathBuf) -> Result<Self, QuizError> {
        let p = path.clone();
        let slots = task::spawn_blocking(move || read_slots(&p))
            .await
            .map_err(|e| QuizError::Storage(e.to_string()))??;
        tracing::debug!(path = %path.display(), slots = slots.len(), "session store opened");
        Ok(Self {
            path,
            slots: Mutex::new(slots),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drops every slot, so the next quiz starts from scratch.
    pub async fn clear(&self) -> Result<(), QuizError> {
        self.slots.lock().clear();
        self.persist().await?;
        tracing::info!(path = %self.path.display(), "session cleared");
        Ok(())
    }

    async fn persist(&self) -> Result<(), QuizError> {
        let image = SessionImage {
            version: SESSION_VERSION,
            slots: self.slots.lock().clone(),
        };
        let bytes = serde_json::to_vec_pretty(&image)?;
        let path = self.path.clone();
        task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| QuizError::Storage(e.to_string()))?
            .map_err(storage_error)
    }
}

fn read_slots(path: &Path) -> Result<Map<String, Value>, QuizError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let buf = fs::read_to_string(path).map_err(storage_error)?;
    if buf.trim().is_empty() {
        return Ok(Map::new());
    }
    let image: SessionImage = serde_json::from_str(&buf)?;
    Ok(image.slots)
}

#[async_trait]
impl SessionStore for JsonSessionStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, QuizError> {
        Ok(self.slots.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), QuizError> {
        {
            let mut slots = self.slots.lock();
            match value {
                Some(v) => {
                    slots.insert(key.to_string(), v);
                }
                None => {
                    slots.remove(key);
                }
            }
        }
        self.persist().await
    }
}
