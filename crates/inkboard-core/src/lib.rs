//! Inkboard Core Library
//!
//! Platform-agnostic state and persistence for the Inkboard drawing engine:
//! colors and tool selection, the snapshot value type, linear undo/redo
//! history, pointer input events, and the key-value persistence slot.

pub mod color;
pub mod history;
pub mod input;
pub mod palette;
pub mod slot;
pub mod snapshot;

pub use color::Color;
pub use history::History;
pub use input::{PointerEvent, PointerSource};
pub use palette::{Palette, Tool};
pub use slot::{FileSlot, MemorySlot, SavedBoard, SlotError, SnapshotSlot, LAST_BOARD_KEY};
pub use snapshot::Snapshot;
