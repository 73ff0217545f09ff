//! PNG export with an opaque background.

use crate::codec::{self, CodecError};
use crate::surface::Surface;
use inkboard_core::Color;
use std::time::{SystemTime, UNIX_EPOCH};

/// Encode the surface composited over an opaque `background` fill.
///
/// The working surface does not track background fills as persistent pixels,
/// so the export copy is filled first and the content drawn on top. The
/// result is fully opaque even if nothing was ever painted.
pub fn export_png(surface: &Surface, background: Color) -> Result<Vec<u8>, CodecError> {
    let composite = surface.composited_over(background);
    codec::encode_rgba(
        composite.px_width(),
        composite.px_height(),
        composite.pixels(),
    )
}

/// Timestamped download name, e.g. `inkboard-1700000000000.png`.
pub fn export_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("inkboard-{}.png", millis)
}
