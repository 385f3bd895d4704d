//! Image encoding for pixsqueeze.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG with a pass-through quality
//! - Encoding images to PNG with a quality-derived compression effort
//! - Dispatching on [`OutputFormat`] so callers only deal in 0-100 quality
//!
//! # Examples
//!
//! ```ignore
//! use pixsqueeze_core::decode::OutputFormat;
//! use pixsqueeze_core::encode::encode;
//!
//! let img = image::DynamicImage::new_rgb8(100, 100);
//! let png_bytes = encode(&img, OutputFormat::Png, 80).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod jpeg;
mod png;

use image::DynamicImage;
use thiserror::Error;

use crate::decode::OutputFormat;

pub use self::jpeg::{encode_jpeg, MAX_JPEG_QUALITY, MIN_JPEG_QUALITY};
pub use self::png::{encode_png, PngEffort};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image in the given output format.
///
/// JPEG receives `quality` unchanged. PNG receives
/// [`PngEffort::from_quality`]`(quality)`.
pub fn encode(
    image: &DynamicImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(image, quality),
        OutputFormat::Png => encode_png(image, PngEffort::from_quality(quality)),
    }
}
