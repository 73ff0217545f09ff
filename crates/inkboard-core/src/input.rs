//! Pointer input events.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Where a pointer event originated. Mouse drags and touch gestures collapse
/// into the same stream; the source is kept so hosts can decide whether to
/// suppress platform default behavior (scrolling) for consumed touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A unified pointer event in container-local logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        source: PointerSource,
    },
    Moved {
        position: Point,
        source: PointerSource,
    },
    Up {
        source: PointerSource,
    },
}

impl PointerEvent {
    pub fn down(position: Point, source: PointerSource) -> Self {
        Self::Down { position, source }
    }

    pub fn moved(position: Point, source: PointerSource) -> Self {
        Self::Moved { position, source }
    }

    pub fn up(source: PointerSource) -> Self {
        Self::Up { source }
    }
}
