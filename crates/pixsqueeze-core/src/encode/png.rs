//! PNG encoding with a quality-derived compression effort.
//!
//! PNG is lossless, so the 0-100 quality knob cannot trade fidelity for
//! size. It is instead inverted onto a 0-9 deflate effort: higher quality
//! means less effort (faster, larger output), lower quality means more.

use std::io::Cursor;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;

use super::EncodeError;
use crate::decode::PixelClass;

/// Deflate effort level on a 0-9 scale.
///
/// 0 stores the image data uncompressed, 9 is maximum compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PngEffort(u8);

impl PngEffort {
    /// Most effort, smallest output.
    pub const MAX: PngEffort = PngEffort(9);

    /// Create an effort level, capping at [`PngEffort::MAX`].
    pub fn new(level: u8) -> Self {
        PngEffort(level.min(Self::MAX.0))
    }

    /// Map a 0-100 quality onto the effort scale: `9 - round(quality * 9 / 100)`.
    ///
    /// Quality above 100 is treated as 100.
    pub fn from_quality(quality: u8) -> Self {
        let quality = u32::from(quality.min(100));
        let inverted = (quality * 9 + 50) / 100;
        // inverted is at most 9, so the subtraction cannot underflow
        PngEffort(Self::MAX.0 - inverted as u8)
    }

    /// The effort level as a number.
    pub fn level(self) -> u8 {
        self.0
    }

    fn compression_type(self) -> CompressionType {
        match self.0 {
            0 => CompressionType::Uncompressed,
            level => CompressionType::Level(level),
        }
    }
}

/// Encode an image to PNG bytes at the given effort.
///
/// 8- and 16-bit layouts are written as-is. Floating point images are
/// converted to 8-bit RGBA first, since PNG has no float samples.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for empty images and
/// `EncodeError::EncodingFailed` if the encoder rejects the buffer.
pub fn encode_png(image: &DynamicImage, effort: PngEffort) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let converted = match PixelClass::of(image) {
        Some(_) => None,
        None => Some(DynamicImage::ImageRgba8(image.to_rgba8())),
    };
    let source = converted.as_ref().unwrap_or(image);

    let mut buffer = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, effort.compression_type(), FilterType::Adaptive);

    source
        .write_with_encoder(encoder)
        .map_err(|e| EncodeError::EncodingFailed(format!("PNG: {e}")))?;

    Ok(buffer.into_inner())
}
