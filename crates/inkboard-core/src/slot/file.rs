//! File-backed slot implementation.

use super::{BoxFuture, SavedBoard, SlotError, SlotResult, SnapshotSlot};
use std::fs;
use std::path::PathBuf;

/// File-backed slot: one JSON document per key under a base directory.
pub struct FileSlot {
    base_path: PathBuf,
}

impl FileSlot {
    /// Create a slot rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> SlotResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                SlotError::Io(format!("failed to create slot directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a slot in the platform's local data directory
    /// (`<data>/inkboard/boards/`).
    pub fn default_location() -> SlotResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| SlotError::Io("could not determine home directory".to_string()))?;

        Self::new(base.join("inkboard").join("boards"))
    }

    /// The file path for a key, with unsafe filename characters replaced.
    fn board_path(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// The directory this slot writes into.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl SnapshotSlot for FileSlot {
    fn save(&self, key: &str, board: &SavedBoard) -> BoxFuture<'_, SlotResult<()>> {
        let path = self.board_path(key);
        let json = match board.to_json() {
            Ok(json) => json,
            Err(e) => return Box::pin(async move { Err(e) }),
        };

        Box::pin(async move {
            fs::write(&path, json)
                .map_err(|e| SlotError::Io(format!("failed to write {}: {}", path.display(), e)))
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, SlotResult<SavedBoard>> {
        let path = self.board_path(key);
        let key_owned = key.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(SlotError::NotFound(key_owned));
            }

            let json = fs::read_to_string(&path)
                .map_err(|e| SlotError::Io(format!("failed to read {}: {}", path.display(), e)))?;

            SavedBoard::from_json(&json).map_err(|e| {
                SlotError::Serialization(format!("failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, SlotResult<()>> {
        let path = self.board_path(key);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    SlotError::Io(format!("failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, SlotResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| SlotError::Io(format!("failed to read directory: {}", e)))?;

            let mut keys = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().map(|e| e == "json").unwrap_or(false) {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        keys.push(stem.to_string());
                    }
                }
            }
            Ok(keys)
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, SlotResult<bool>> {
        let path = self.board_path(key);
        Box::pin(async move { Ok(path.exists()) })
    }
}
