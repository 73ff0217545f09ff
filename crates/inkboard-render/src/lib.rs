//! Inkboard Render Library
//!
//! CPU rasterization and session control for the Inkboard drawing engine:
//! the drawable surface, freehand stroke rendering, the PNG snapshot codec,
//! export compositing, and the `Whiteboard` session controller.

mod board;
mod codec;
mod export;
mod stroke;
mod surface;

pub use board::Whiteboard;
pub use codec::{CodecError, DecodedImage, decode, encode};
pub use export::{export_file_name, export_png};
pub use stroke::StrokeRenderer;
pub use surface::Surface;
