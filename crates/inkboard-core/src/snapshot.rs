//! Encoded raster snapshots.

use std::fmt;
use std::sync::Arc;

/// An immutable, encoded (PNG) copy of the surface's pixels at one instant.
///
/// Snapshots are the unit of undo/redo and persistence. The encoded bytes
/// are reference-counted, so cloning is cheap and a snapshot can sit in the
/// history stack and the persistence slot at the same time without copies.
/// Never mutated after creation.
#[derive(Clone, PartialEq)]
pub struct Snapshot {
    png: Arc<[u8]>,
    width: f64,
    height: f64,
    scale: f64,
}

impl Snapshot {
    /// Wrap encoded PNG bytes captured at the given logical size and scale.
    pub fn new(png: Vec<u8>, width: f64, height: f64, scale: f64) -> Self {
        Self {
            png: png.into(),
            width,
            height,
            scale,
        }
    }

    /// The encoded PNG payload.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Logical width at capture time.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height at capture time.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Device pixel ratio at capture time.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scale", &self.scale)
            .field("png_len", &self.png.len())
            .finish()
    }
}
