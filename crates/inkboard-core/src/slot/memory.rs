//! In-memory slot implementation.

use super::{BoxFuture, SavedBoard, SlotError, SlotResult, SnapshotSlot};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory slot for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySlot {
    boards: RwLock<HashMap<String, SavedBoard>>,
}

impl MemorySlot {
    /// Create a new empty slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotSlot for MemorySlot {
    fn save(&self, key: &str, board: &SavedBoard) -> BoxFuture<'_, SlotResult<()>> {
        let key = key.to_string();
        let board = board.clone();
        Box::pin(async move {
            let mut boards = self
                .boards
                .write()
                .map_err(|e| SlotError::Other(format!("lock error: {}", e)))?;
            boards.insert(key, board);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, SlotResult<SavedBoard>> {
        let key = key.to_string();
        Box::pin(async move {
            let boards = self
                .boards
                .read()
                .map_err(|e| SlotError::Other(format!("lock error: {}", e)))?;
            boards.get(&key).cloned().ok_or(SlotError::NotFound(key))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, SlotResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut boards = self
                .boards
                .write()
                .map_err(|e| SlotError::Other(format!("lock error: {}", e)))?;
            boards.remove(&key);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, SlotResult<Vec<String>>> {
        Box::pin(async move {
            let boards = self
                .boards
                .read()
                .map_err(|e| SlotError::Other(format!("lock error: {}", e)))?;
            Ok(boards.keys().cloned().collect())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, SlotResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let boards = self
                .boards
                .read()
                .map_err(|e| SlotError::Other(format!("lock error: {}", e)))?;
            Ok(boards.contains_key(&key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::block_on;

    fn board() -> SavedBoard {
        SavedBoard {
            width: 640.0,
            height: 480.0,
            scale: 1.0,
            data: "cGl4ZWxz".to_string(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let slot = MemorySlot::new();

        block_on(slot.save("board", &board())).unwrap();
        let loaded = block_on(slot.load("board")).unwrap();

        assert_eq!(loaded, board());
    }

    #[test]
    fn test_load_missing_key() {
        let slot = MemorySlot::new();
        let result = block_on(slot.load("nope"));

        assert!(matches!(result, Err(SlotError::NotFound(_))));
    }

    #[test]
    fn test_save_overwrites() {
        let slot = MemorySlot::new();
        block_on(slot.save("board", &board())).unwrap();

        let mut updated = board();
        updated.data = "bmV3".to_string();
        block_on(slot.save("board", &updated)).unwrap();

        assert_eq!(block_on(slot.load("board")).unwrap(), updated);
    }

    #[test]
    fn test_delete_and_exists() {
        let slot = MemorySlot::new();

        assert!(!block_on(slot.exists("board")).unwrap());
        block_on(slot.save("board", &board())).unwrap();
        assert!(block_on(slot.exists("board")).unwrap());

        block_on(slot.delete("board")).unwrap();
        assert!(!block_on(slot.exists("board")).unwrap());
    }

    #[test]
    fn test_list() {
        let slot = MemorySlot::new();
        block_on(slot.save("a", &board())).unwrap();
        block_on(slot.save("b", &board())).unwrap();

        let mut keys = block_on(slot.list()).unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
