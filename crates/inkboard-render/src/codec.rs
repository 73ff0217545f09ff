//! Lossless PNG encode/decode for snapshots.

use crate::surface::Surface;
use inkboard_core::Snapshot;
use thiserror::Error;

/// Snapshot codec errors.
///
/// Decode failures are recoverable: a board faced with an undecodable
/// snapshot falls back to a blank surface instead of crashing.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("png encode failed: {0}")]
    Encode(String),
    #[error("png decode failed: {0}")]
    Decode(String),
    #[error("board has no drawable surface")]
    NoSurface,
}

/// Decoded snapshot pixels (RGBA8, physical resolution).
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Encode the surface's pixels into an immutable snapshot.
pub fn encode(surface: &Surface) -> Result<Snapshot, CodecError> {
    let data = encode_rgba(surface.px_width(), surface.px_height(), surface.pixels())?;
    Ok(Snapshot::new(
        data,
        surface.width(),
        surface.height(),
        surface.scale(),
    ))
}

/// Encode raw RGBA8 pixels as a PNG (8-bit, lossless).
pub(crate) fn encode_rgba(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        writer
            .write_image_data(pixels)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
    }
    Ok(data)
}

/// Decode a snapshot's PNG payload back into raw RGBA pixels.
pub fn decode(snapshot: &Snapshot) -> Result<DecodedImage, CodecError> {
    decode_png(snapshot.png_bytes())
}

/// Decode PNG bytes into raw RGBA pixels.
pub(crate) fn decode_png(bytes: &[u8]) -> Result<DecodedImage, CodecError> {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::Decode(e.to_string()))?;

    if info.color_type != png::ColorType::Rgba || info.bit_depth != png::BitDepth::Eight {
        return Err(CodecError::Decode(format!(
            "unsupported pixel format {:?}/{:?}",
            info.color_type, info.bit_depth
        )));
    }

    buf.truncate(info.buffer_size());
    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        pixels: buf,
    })
}
