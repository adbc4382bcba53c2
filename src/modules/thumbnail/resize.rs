use image::RgbaImage;
use image::imageops::{self, FilterType};

use super::codec::RasterImage;
use super::error::JobErrorKind;

/// Thumbnail policy: fixed target width, height scaled to preserve the
/// source aspect ratio (rounded, clamped to at least 1 pixel). Upscaling a
/// source narrower than the target is allowed.
pub fn target_dimensions(
    width: u32,
    height: u32,
    target_width: u32,
) -> Result<(u32, u32), JobErrorKind> {
    if width == 0 || height == 0 {
        return Err(JobErrorKind::InvalidDimensions(format!(
            "source raster is {}x{}",
            width, height
        )));
    }
    if target_width == 0 {
        return Err(JobErrorKind::InvalidDimensions(
            "target width is zero".to_string(),
        ));
    }

    let ratio = target_width as f32 / width as f32;
    let target_height = ((height as f32) * ratio).round().max(1.0) as u32;

    Ok((target_width, target_height))
}

/// Resamples the source raster to the policy dimensions using a bilinear
/// filter. Pure function of its input: the same raster always yields a
/// byte-identical result.
pub fn resize(source: RasterImage, target_width: u32) -> Result<RasterImage, JobErrorKind> {
    let (new_width, new_height) = target_dimensions(source.width, source.height, target_width)?;

    let rgba = RgbaImage::from_raw(source.width, source.height, source.pixels).ok_or_else(|| {
        JobErrorKind::InvalidDimensions(
            "pixel buffer does not match declared dimensions".to_string(),
        )
    })?;

    let resized = imageops::resize(&rgba, new_width, new_height, FilterType::Triangle);

    Ok(RasterImage {
        width: new_width,
        height: new_height,
        pixels: resized.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::thumbnail::codec::CHANNELS;

    fn gradient_raster(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height) as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    ((x * 7 + y * 13) % 256) as u8,
                    ((x * 3 + y * 29) % 256) as u8,
                    ((x + y) % 256) as u8,
                    255,
                ]);
            }
        }
        RasterImage {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn scales_height_to_preserve_aspect_ratio() {
        assert_eq!(target_dimensions(800, 600, 100).unwrap(), (100, 75));
        assert_eq!(target_dimensions(1920, 1080, 100).unwrap(), (100, 56));
    }

    #[test]
    fn height_never_collapses_to_zero() {
        // 1000x1 at width 100 would round to height 0 without the clamp.
        assert_eq!(target_dimensions(1000, 1, 100).unwrap(), (100, 1));
    }

    #[test]
    fn zero_area_source_is_rejected() {
        let err = target_dimensions(0, 600, 100).unwrap_err();
        assert!(matches!(err, JobErrorKind::InvalidDimensions(_)));

        let err = target_dimensions(800, 0, 100).unwrap_err();
        assert!(matches!(err, JobErrorKind::InvalidDimensions(_)));
    }

    #[test]
    fn zero_target_width_is_rejected() {
        let err = target_dimensions(800, 600, 0).unwrap_err();
        assert!(matches!(err, JobErrorKind::InvalidDimensions(_)));
    }

    #[test]
    fn output_upholds_pixel_length_invariant() {
        let out = resize(gradient_raster(37, 21), 10).unwrap();
        assert_eq!((out.width, out.height), (10, 6));
        assert_eq!(
            out.pixels.len(),
            (out.width * out.height) as usize * CHANNELS
        );
    }

    #[test]
    fn resize_is_deterministic() {
        let source = gradient_raster(50, 40);
        let a = resize(source.clone(), 16).unwrap();
        let b = resize(source, 16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn upscaling_small_sources_is_allowed() {
        let out = resize(gradient_raster(4, 4), 10).unwrap();
        assert_eq!((out.width, out.height), (10, 10));
        assert_eq!(
            out.pixels.len(),
            (out.width * out.height) as usize * CHANNELS
        );
    }
}
