use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct StorePaths {
    pub vocabulary_file: PathBuf,
    pub session_file: PathBuf,
    pub backups_dir: PathBuf,
}

impl StorePaths {
    pub fn in_dir(root: &Path) -> Self {
        Self {
            vocabulary_file: root.join("vocabulary.json"),
            session_file: root.join("word-group-session.json"),
            backups_dir: root.join("backups"),
        }
    }
}

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("se", "svenska", "Svenska") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn default_store_files() -> StorePaths {
    StorePaths::in_dir(&data_root())
}
