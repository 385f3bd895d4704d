//! JPEG encoding.
//!
//! Baseline JPEG carries neither alpha nor 16-bit samples, so the source is
//! flattened to 8-bit RGB (or 8-bit grayscale for grayscale sources) before
//! it reaches the `image` crate's encoder.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use super::EncodeError;
use crate::decode::PixelClass;

/// Lowest quality the JPEG encoder accepts.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Highest JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Source image in any pixel layout
/// * `quality` - JPEG quality (0-100, where 100 is highest quality). Zero is
///   raised to the encoder minimum of 1; values above 100 are lowered to 100.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for empty images and
/// `EncodeError::EncodingFailed` if the encoder rejects the buffer.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let quality = quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);

    let flattened = match PixelClass::of(image) {
        Some(PixelClass::L8) => None,
        Some(class) if class.is_grayscale() => Some(DynamicImage::ImageLuma8(image.to_luma8())),
        Some(PixelClass::Rgb8) => None,
        _ => Some(DynamicImage::ImageRgb8(image.to_rgb8())),
    };
    let source = flattened.as_ref().unwrap_or(image);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    source
        .write_with_encoder(encoder)
        .map_err(|e| EncodeError::EncodingFailed(format!("JPEG: {e}")))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
