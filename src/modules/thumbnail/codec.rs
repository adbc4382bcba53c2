use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat, RgbaImage};

use super::error::JobErrorKind;

/// Channel count of the internal raster layout (RGBA8).
pub const CHANNELS: usize = 4;

/// Decoded pixel data. Every source format is normalized to RGBA8 on decode,
/// so `pixels.len() == width * height * CHANNELS` holds for the whole
/// decode/resize/encode chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decodes a compressed image buffer into an RGBA8 raster. Sniffs the format
/// from the bytes; unrecognized or truncated input fails with `Decode`.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, JobErrorKind> {
    let img = image::load_from_memory(bytes).map_err(|e| JobErrorKind::Decode(e.to_string()))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(RasterImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Encodes a raster as JPEG at the given quality. Deterministic for a given
/// raster; fails only on an internal encoder error, never on valid input.
pub fn encode(raster: RasterImage, quality: u8) -> Result<Bytes, JobErrorKind> {
    let rgba = RgbaImage::from_raw(raster.width, raster.height, raster.pixels).ok_or_else(|| {
        JobErrorKind::Encode("pixel buffer does not match declared dimensions".to_string())
    })?;

    // JPEG carries no alpha channel.
    let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(quality))
        .map_err(|e| JobErrorKind::Encode(e.to_string()))?;

    Ok(Bytes::from(buf))
}

#[cfg(test)]
pub(crate) fn solid_raster(width: u32, height: u32, rgba: [u8; 4]) -> RasterImage {
    let mut pixels = Vec::with_capacity((width * height) as usize * CHANNELS);
    for _ in 0..width * height {
        pixels.extend_from_slice(&rgba);
    }
    RasterImage {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
pub(crate) fn jpeg_bytes(width: u32, height: u32) -> Bytes {
    encode(solid_raster(width, height, [180, 90, 30, 255]), 85).unwrap()
}
