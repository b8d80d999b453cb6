use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use svenska_core::{
    ContainerId, FavoriteToggleService, QuizError, Vocabulary, VocabularyId, VocabularySource,
};
use tempfile::NamedTempFile;
use tokio::task;

pub mod paths;
pub mod session;

pub use session::JsonSessionStore;

const FILE_VERSION: u32 = 1;

#[derive(Clone, Serialize, Deserialize)]
struct FileImage {
    version: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    vocabularies: Vec<Vocabulary>,
}

#[derive(Clone)]
struct State {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    vocabularies: BTreeMap<VocabularyId, Vocabulary>,
}

impl State {
    fn new_empty() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            vocabularies: BTreeMap::new(),
        }
    }

    fn to_image(&self) -> FileImage {
        FileImage {
            version: FILE_VERSION,
            created_at: self.created_at,
            updated_at: self.updated_at,
            vocabularies: self.vocabularies.values().cloned().collect(),
        }
    }

    fn from_image(img: FileImage) -> Self {
        Self {
            created_at: img.created_at,
            updated_at: img.updated_at,
            vocabularies: img.vocabularies.into_iter().map(|v| (v.id, v)).collect(),
        }
    }

    fn next_id(&self) -> VocabularyId {
        self.vocabularies.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// Vocabulary kept in one JSON file, rewritten atomically on every change
/// with a rotated timestamped backup next to it.
pub struct JsonVocabularyStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
    state: RwLock<State>,
}

impl JsonVocabularyStore {
    pub async fn open_default() -> Result<Self, QuizError> {
        let paths = paths::default_store_files();
        Self::open_with(paths.vocabulary_file, paths.backups_dir, 10).await
    }

    pub async fn open_with(path: PathBuf, backups_dir: PathBuf, max_backups: usize) -> Result<Self, QuizError> {
        ensure_parent_dirs(&path)?;
        ensure_dir(&backups_dir)?;
        let state = load_or_init(&path).await?;
        tracing::debug!(path = %path.display(), entries = state.vocabularies.len(), "vocabulary store opened");
        Ok(Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores a new entry under the next free id and returns it.
    pub async fn add_vocabulary(&self, mut vocabulary: Vocabulary) -> Result<Vocabulary, QuizError> {
        {
            let mut s = self.state.write();
            vocabulary.id = s.next_id();
            vocabulary.last_edited = Utc::now();
            s.vocabularies.insert(vocabulary.id, vocabulary.clone());
        }
        self.save().await?;
        Ok(vocabulary)
    }

    pub fn list(&self) -> Vec<Vocabulary> {
        self.state.read().vocabularies.values().cloned().collect()
    }

    async fn save(&self) -> Result<(), QuizError> {
        let snapshot = {
            let mut s = self.state.write();
            s.updated_at = Utc::now();
            s.to_image()
        };
        let path = self.path.clone();
        let backups = self.backups_dir.clone();
        let keep = self.max_backups;

        task::spawn_blocking(move || write_with_backup(&path, &backups, keep, &snapshot))
            .await
            .map_err(|e| QuizError::Storage(e.to_string()))?
            .map_err(storage_error)?;
        Ok(())
    }
}

pub(crate) fn storage_error(e: io::Error) -> QuizError {
    QuizError::Storage(e.to_string())
}

fn ensure_parent_dirs(path: &Path) -> Result<(), QuizError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<(), QuizError> {
    fs::create_dir_all(path).map_err(storage_error)
}

async fn load_or_init(path: &Path) -> Result<State, QuizError> {
    if path.exists() {
        let p = path.to_path_buf();
        let img: FileImage = task::spawn_blocking(move || {
            let buf = fs::read_to_string(&p)?;
            let v = serde_json::from_str::<FileImage>(&buf)?;
            Ok::<FileImage, io::Error>(v)
        })
        .await
        .map_err(|e| QuizError::Storage(e.to_string()))
        .and_then(|r| r.map_err(storage_error))?;
        Ok(State::from_image(img))
    } else {
        let st = State::new_empty();
        let bytes = serde_json::to_vec_pretty(&st.to_image())?;
        write_atomic(path, &bytes).map_err(storage_error)?;
        Ok(st)
    }
}

/// Replaces `path` with `bytes` through a temp file in the same directory.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), io::Error> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn write_with_backup(path: &Path, backups_dir: &Path, max_backups: usize, img: &FileImage) -> Result<(), io::Error> {
    let json = serde_json::to_vec_pretty(img)?;
    write_atomic(path, &json)?;

    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    let backup_path = backups_dir.join(format!("vocabulary-{ts}.json"));
    write_atomic(&backup_path, &json)?;

    rotate_backups(backups_dir, max_backups)
}

fn rotate_backups(dir: &Path, keep: usize) -> Result<(), io::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    // Timestamped names sort chronologically.
    entries.sort_by_key(|e| e.file_name());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}

#[async_trait]
impl VocabularySource for JsonVocabularyStore {
    async fn load(&self, container_id: Option<ContainerId>) -> Result<Vec<Vocabulary>, QuizError> {
        let s = self.state.read();
        let mut v: Vec<Vocabulary> = s.vocabularies.values().cloned().collect();
        if let Some(cid) = container_id {
            v.retain(|voc| voc.container_id == cid);
        }
        Ok(v)
    }
}

#[async_trait]
impl FavoriteToggleService for JsonVocabularyStore {
    async fn toggle(&self, vocabulary_id: VocabularyId, is_favorite: bool) -> Result<(), QuizError> {
        {
            let mut s = self.state.write();
            let Some(v) = s.vocabularies.get_mut(&vocabulary_id) else {
                return Err(QuizError::NotFound("vocabulary"));
            };
            v.is_favorite = is_favorite;
        }
        self.save().await
    }
}
