//! Single-pixel PNG encoding.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::colour::Colour;
use crate::error::{Result, SwatchError};

/// Encode a 1x1 RGBA PNG carrying the given colour, in memory.
///
/// The encoder writes a complete stream (it may include ancillary
/// chunks); pass the result through [`crate::png::reduce_bytes`] to get
/// the minimal form.
pub fn encode_pixel(colour: Colour) -> Result<Vec<u8>> {
    let img = RgbaImage::from_pixel(1, 1, Rgba(colour.to_rgba()));

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SwatchError::Build {
            message: format!("Failed to encode PNG: {}", e),
            help: None,
        })?;

    Ok(bytes)
}
