//! Percentage-based resampling that keeps the source pixel layout.
//!
//! The filter math itself is the `image` crate's; this module only decides
//! the target dimensions, the buffer layout and which filter to run.

use image::imageops;
use image::{ColorType, DynamicImage, Limits};
use log::debug;

use super::{PixelClass, ResizeAlgorithm, ResizeError};

/// Percentage that leaves an image untouched.
pub const NO_RESIZE_PERCENT: u32 = 100;

/// `imageops::resize` samples vertically into an RGBA f32 buffer before the
/// horizontal pass.
const SCRATCH_BYTES_PER_PIXEL: u64 = 16;

/// Scale a single dimension by `percent`, rounding half up.
///
/// The result is never smaller than one pixel.
pub fn scale_dimension(dim: u32, percent: u32) -> u32 {
    let scaled = (u64::from(dim) * u64::from(percent) + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// Compute the resized dimensions for a `width x height` image.
///
/// Each axis is scaled independently by the same factor, so the aspect ratio
/// is kept up to rounding.
pub fn scaled_dimensions(width: u32, height: u32, percent: u32) -> (u32, u32) {
    (
        scale_dimension(width, percent),
        scale_dimension(height, percent),
    )
}

/// Check that resizing `image` to `width x height` stays within the same
/// allocation limit the decoder runs under.
///
/// Counts the output buffer, the f32 scratch buffer of the resampler and,
/// for layouts that fall back to RGBA8, the converted copy of the source.
pub fn check_resize_budget(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<(), ResizeError> {
    let mut limits = Limits::default();
    let limit = limits.max_alloc.unwrap_or(u64::MAX);

    let source_pixels = u64::from(image.width()).saturating_mul(u64::from(image.height()));
    let scratch = u64::from(image.width())
        .saturating_mul(u64::from(height))
        .saturating_mul(SCRATCH_BYTES_PER_PIXEL);

    let reserved = match PixelClass::of(image) {
        Some(_) => limits.reserve_buffer(width, height, image.color()),
        None => limits
            .reserve(source_pixels.saturating_mul(4))
            .and_then(|()| limits.reserve_buffer(width, height, ColorType::Rgba8)),
    };

    reserved
        .and_then(|()| limits.reserve(scratch))
        .map_err(|_| ResizeError::TooLarge {
            width,
            height,
            limit,
        })
}

/// Resize an image by a percentage of its current size.
///
/// The output uses the same pixel layout as the input for every 8- and
/// 16-bit layout. Floating point images are resampled into 8-bit straight
/// RGBA, which deflates better than the alternatives for PNG output.
///
/// Empty images are returned as-is.
///
/// # Errors
///
/// Returns `ResizeError::TooLarge` without allocating when the target would
/// not fit in the allocation budget (see [`check_resize_budget`]).
pub fn resize_by_percent(
    image: &DynamicImage,
    percent: u32,
    algorithm: ResizeAlgorithm,
) -> Result<DynamicImage, ResizeError> {
    if image.width() == 0 || image.height() == 0 {
        return Ok(image.clone());
    }

    let (width, height) = scaled_dimensions(image.width(), image.height(), percent);
    check_resize_budget(image, width, height)?;
    let filter = algorithm.to_image_filter();

    debug!(
        "resizing {}x{} -> {}x{} ({}%, {})",
        image.width(),
        image.height(),
        width,
        height,
        percent,
        algorithm
    );

    let resized = match image {
        DynamicImage::ImageLuma8(buf) => {
            DynamicImage::ImageLuma8(imageops::resize(buf, width, height, filter))
        }
        DynamicImage::ImageLumaA8(buf) => {
            DynamicImage::ImageLumaA8(imageops::resize(buf, width, height, filter))
        }
        DynamicImage::ImageRgb8(buf) => {
            DynamicImage::ImageRgb8(imageops::resize(buf, width, height, filter))
        }
        DynamicImage::ImageRgba8(buf) => {
            DynamicImage::ImageRgba8(imageops::resize(buf, width, height, filter))
        }
        DynamicImage::ImageLuma16(buf) => {
            DynamicImage::ImageLuma16(imageops::resize(buf, width, height, filter))
        }
        DynamicImage::ImageLumaA16(buf) => {
            DynamicImage::ImageLumaA16(imageops::resize(buf, width, height, filter))
        }
        DynamicImage::ImageRgb16(buf) => {
            DynamicImage::ImageRgb16(imageops::resize(buf, width, height, filter))
        }
        DynamicImage::ImageRgba16(buf) => {
            DynamicImage::ImageRgba16(imageops::resize(buf, width, height, filter))
        }
        other => {
            let rgba = other.to_rgba8();
            DynamicImage::ImageRgba8(imageops::resize(&rgba, width, height, filter))
        }
    };

    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelClass;
    use image::{Rgb, RgbImage};

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        // Simple gradient
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
            ])
        }))
    }

    #[test]
    fn test_scale_dimension_exact() {
        assert_eq!(scale_dimension(1000, 50), 500);
        assert_eq!(scale_dimension(200, 25), 50);
        assert_eq!(scale_dimension(640, 100), 640);
    }

    #[test]
    fn test_scale_dimension_rounds_half_up() {
        // 15 * 50 / 100 = 7.5
        assert_eq!(scale_dimension(15, 50), 8);
        // 13 * 50 / 100 = 6.5
        assert_eq!(scale_dimension(13, 50), 7);
        // 99 * 33 / 100 = 32.67
        assert_eq!(scale_dimension(99, 33), 33);
        // 10 * 33 / 100 = 3.3
        assert_eq!(scale_dimension(10, 33), 3);
    }

    #[test]
    fn test_scale_dimension_never_zero() {
        assert_eq!(scale_dimension(1, 1), 1);
        assert_eq!(scale_dimension(3, 10), 1);
    }

    #[test]
    fn test_scale_dimension_upscale() {
        assert_eq!(scale_dimension(100, 500), 500);
        assert_eq!(scale_dimension(u32::MAX, 500), u32::MAX);
    }

    #[test]
    fn test_scaled_dimensions_keeps_aspect() {
        assert_eq!(scaled_dimensions(6000, 4000, 10), (600, 400));
        assert_eq!(scaled_dimensions(4000, 6000, 10), (400, 600));
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize_by_percent(&img, 50, ResizeAlgorithm::BiLinear).unwrap();

        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 25);
        assert_eq!(resized.as_bytes().len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_upscale() {
        let img = create_test_image(50, 25);
        let resized = resize_by_percent(&img, 200, ResizeAlgorithm::CatmullRom).unwrap();

        assert_eq!(resized.width(), 100);
        assert_eq!(resized.height(), 50);
    }

    #[test]
    fn test_all_algorithms_same_dimensions() {
        let img = create_test_image(101, 37);

        for algorithm in ResizeAlgorithm::ALL {
            let resized = resize_by_percent(&img, 33, algorithm).unwrap();
            assert_eq!(
                (resized.width(), resized.height()),
                (33, 12),
                "{algorithm} produced wrong dimensions"
            );
        }
    }

    #[test]
    fn test_resize_preserves_known_pixel_classes() {
        let sources = [
            DynamicImage::new_luma8(20, 20),
            DynamicImage::new_luma_a8(20, 20),
            DynamicImage::new_rgb8(20, 20),
            DynamicImage::new_rgba8(20, 20),
            DynamicImage::new_luma16(20, 20),
            DynamicImage::new_luma_a16(20, 20),
            DynamicImage::new_rgb16(20, 20),
            DynamicImage::new_rgba16(20, 20),
        ];

        for source in &sources {
            let resized = resize_by_percent(source, 50, ResizeAlgorithm::BiLinear).unwrap();
            assert_eq!(PixelClass::of(&resized), PixelClass::of(source));
            assert_eq!((resized.width(), resized.height()), (10, 10));
        }
    }

    #[test]
    fn test_resize_float_falls_back_to_rgba8() {
        let img = DynamicImage::new_rgb32f(20, 20);
        let resized = resize_by_percent(&img, 50, ResizeAlgorithm::BiLinear).unwrap();

        assert!(matches!(resized, DynamicImage::ImageRgba8(_)));
        assert_eq!((resized.width(), resized.height()), (10, 10));
    }

    #[test]
    fn test_resize_nearest_keeps_flat_color() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([10, 200, 30])));
        let resized = resize_by_percent(&img, 25, ResizeAlgorithm::NearestNeighbor)
            .unwrap()
            .to_rgb8();

        assert!(resized.pixels().all(|p| p.0 == [10, 200, 30]));
    }

    #[test]
    fn test_resize_budget_allows_moderate_upscale() {
        let img = DynamicImage::new_rgb8(1000, 1000);
        assert!(check_resize_budget(&img, 2000, 2000).is_ok());
    }

    #[test]
    fn test_resize_budget_rejects_oversized_upscale() {
        // 4000x3000 at 500% needs a 20000x15000 buffer plus the f32 scratch
        let img = DynamicImage::new_luma8(4000, 3000);

        let err = resize_by_percent(&img, 500, ResizeAlgorithm::BiLinear).unwrap_err();
        assert_eq!(
            err,
            ResizeError::TooLarge {
                width: 20000,
                height: 15000,
                limit: 512 * 1024 * 1024,
            }
        );
    }

    #[test]
    fn test_resize_budget_counts_float_conversion() {
        let img = DynamicImage::new_rgb32f(8, 8);
        assert!(check_resize_budget(&img, 16, 16).is_ok());
        assert!(check_resize_budget(&img, u32::MAX, u32::MAX).is_err());
    }

    #[test]
    fn test_resize_empty_image_is_noop() {
        let img = DynamicImage::new_rgb8(0, 0);
        let resized = resize_by_percent(&img, 50, ResizeAlgorithm::BiLinear).unwrap();
        assert_eq!((resized.width(), resized.height()), (0, 0));
    }
}
