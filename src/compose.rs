//! Screenshot composition: decode, black-out, clip, encode.
//!
//! Pure pixel work, no I/O. The ordering here is a correctness requirement:
//! black-out rectangles are always filled in the full, unclipped coordinate
//! space, and clipping happens strictly afterwards, so redaction coordinates
//! never depend on the frame.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::debug;

use crate::error::{Error, Result};
use crate::rect::Rect;

// ============================================================================
// Constants
// ============================================================================

/// Fill color for black-out rectangles: opaque black.
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

// ============================================================================
// Decode
// ============================================================================

/// Decodes raw screenshot bytes into a mutable RGBA image.
///
/// # Errors
///
/// Returns [`Error::Capture`] if the bytes are not a decodable image.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| Error::capture(format!("decode failed: {e}")))?;
    Ok(image.to_rgba8())
}

/// Decodes a base64-encoded screenshot payload into raw bytes.
///
/// Convenience for adapters whose backends hand screenshots over as
/// base64 strings rather than raw bytes.
///
/// # Errors
///
/// Returns [`Error::Capture`] if the payload is not valid base64.
pub fn decode_base64_image(data: &str) -> Result<Vec<u8>> {
    Base64Standard
        .decode(data)
        .map_err(|e| Error::capture(format!("base64 decode failed: {e}")))
}

// ============================================================================
// Black-out
// ============================================================================

/// Fills one rectangle with opaque black, clamped to the image bounds.
///
/// A rectangle entirely outside the image is a no-op. Overlapping fills
/// overwrite each other, so for a list of rectangles the final pixels do
/// not depend on list order.
pub fn black_out(image: &mut RgbaImage, rect: Rect) {
    let Some((x, y, width, height)) = rect.clamp_to(image.width(), image.height()) else {
        return;
    };

    for py in y..y + height {
        for px in x..x + width {
            image.put_pixel(px, py, BLACK);
        }
    }
}

/// Fills every rectangle in list order.
pub fn black_out_all(image: &mut RgbaImage, rects: &[Rect]) {
    for rect in rects {
        black_out(image, *rect);
    }
}

// ============================================================================
// Clip
// ============================================================================

/// Clips the image to a frame rectangle.
///
/// A degenerate frame (zero width or height) returns the image unchanged;
/// otherwise the frame is clamped to the image bounds and the overlap is
/// cropped out.
#[must_use]
pub fn clip(image: RgbaImage, frame: Rect) -> RgbaImage {
    let Some((x, y, width, height)) = frame.clamp_to(image.width(), image.height()) else {
        return image;
    };

    image::imageops::crop_imm(&image, x, y, width, height).to_image()
}

// ============================================================================
// Encode
// ============================================================================

/// Encodes the image as PNG into memory.
///
/// # Errors
///
/// Returns [`Error::Capture`] if encoding fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| Error::capture(format!("encode failed: {e}")))?;
    Ok(buffer.into_inner())
}

// ============================================================================
// Pipeline
// ============================================================================

/// Runs the full composition: decode, black-out in list order, clip, encode.
///
/// # Errors
///
/// Returns [`Error::Capture`] on decode or encode failure.
pub fn compose(bytes: &[u8], frame: Rect, black_outs: &[Rect]) -> Result<Vec<u8>> {
    let mut image = decode(bytes)?;

    debug!(
        width = image.width(),
        height = image.height(),
        black_outs = black_outs.len(),
        ?frame,
        "Composing screenshot"
    );

    black_out_all(&mut image, black_outs);
    let image = clip(image, frame);
    encode_png(&image)
}

// ============================================================================
// Tests
// ============================================================================
