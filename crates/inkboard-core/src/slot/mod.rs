//! Key-value persistence slot for board images.
//!
//! The slot stores the most recent state of a board as a small JSON document
//! wrapping a base64-encoded PNG. One document per key, last-write-wins, no
//! versioning or expiry. Backends can live in memory, on disk, or remotely.

mod file;
mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;

use crate::snapshot::Snapshot;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Key under which the most recently edited board is saved, read once at
/// startup to restore the previous session.
pub const LAST_BOARD_KEY: &str = "__last_board__";

/// Slot errors.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("board not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("slot error: {0}")]
    Other(String),
}

/// Result type for slot operations.
pub type SlotResult<T> = Result<T, SlotError>;

/// Boxed future for async slot operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A persisted board image: the encoded pixels plus the logical size and
/// scale they were captured at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBoard {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    /// Base64-encoded PNG payload.
    pub data: String,
}

impl SavedBoard {
    /// Wrap a snapshot for persistence.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            width: snapshot.width(),
            height: snapshot.height(),
            scale: snapshot.scale(),
            data: BASE64.encode(snapshot.png_bytes()),
        }
    }

    /// Unwrap back into a snapshot. Fails on a corrupt payload.
    pub fn to_snapshot(&self) -> SlotResult<Snapshot> {
        let png = BASE64
            .decode(&self.data)
            .map_err(|e| SlotError::Serialization(format!("invalid image payload: {}", e)))?;
        Ok(Snapshot::new(png, self.width, self.height, self.scale))
    }

    /// Serialize to the on-disk JSON document format.
    pub fn to_json(&self) -> SlotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SlotError::Serialization(e.to_string()))
    }

    /// Deserialize from the on-disk JSON document format.
    pub fn from_json(json: &str) -> SlotResult<Self> {
        serde_json::from_str(json).map_err(|e| SlotError::Serialization(e.to_string()))
    }
}

/// Trait for slot backends.
///
/// Operations are future-shaped so that backends backed by async IO fit the
/// same interface; the bundled backends complete immediately.
pub trait SnapshotSlot: Send + Sync {
    /// Save a board under `key`, replacing any previous value.
    fn save(&self, key: &str, board: &SavedBoard) -> BoxFuture<'_, SlotResult<()>>;

    /// Load the board saved under `key`.
    fn load(&self, key: &str) -> BoxFuture<'_, SlotResult<SavedBoard>>;

    /// Delete the board saved under `key` (missing keys are fine).
    fn delete(&self, key: &str) -> BoxFuture<'_, SlotResult<()>>;

    /// List all saved keys.
    fn list(&self) -> BoxFuture<'_, SlotResult<Vec<String>>>;

    /// Check whether `key` has a saved board.
    fn exists(&self, key: &str) -> BoxFuture<'_, SlotResult<bool>>;
}

/// Drive a slot future to completion on the current thread.
///
/// The engine handles input synchronously and the bundled backends never
/// return `Pending`, so a minimal polling executor is all that is needed,
/// without an async runtime dependency.
pub fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_board_snapshot_round_trip() {
        let snapshot = Snapshot::new(vec![1, 2, 3, 250], 640.0, 480.0, 2.0);
        let saved = SavedBoard::from_snapshot(&snapshot);
        let restored = saved.to_snapshot().unwrap();

        assert_eq!(restored.png_bytes(), snapshot.png_bytes());
        assert_eq!(restored.width(), 640.0);
        assert_eq!(restored.height(), 480.0);
        assert_eq!(restored.scale(), 2.0);
    }

    #[test]
    fn test_saved_board_json_round_trip() {
        let saved = SavedBoard {
            width: 100.0,
            height: 50.0,
            scale: 1.0,
            data: "aGVsbG8=".to_string(),
        };
        let json = saved.to_json().unwrap();
        assert_eq!(SavedBoard::from_json(&json).unwrap(), saved);
    }

    #[test]
    fn test_corrupt_payload_is_an_error() {
        let saved = SavedBoard {
            width: 1.0,
            height: 1.0,
            scale: 1.0,
            data: "not base64!!!".to_string(),
        };
        assert!(matches!(
            saved.to_snapshot(),
            Err(SlotError::Serialization(_))
        ));
    }
}
