//! The decode → resize → encode pipeline and its size-comparison policy.
//!
//! When a resize is requested the image is encoded twice, once at full
//! resolution and once resized, and the smaller output wins. Resampling and
//! recompression do not always shrink a file (tiny images, percentages close
//! to 100, upscales), so the comparison keeps the result from ever being
//! larger than a plain recompression.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{
    decode_image, resize_by_percent, DecodeError, OutputFormat, ResizeAlgorithm, ResizeError,
    NO_RESIZE_PERCENT,
};
use crate::encode::{encode, EncodeError};

/// Highest accepted quality.
pub const MAX_QUALITY: u8 = 100;

/// Smallest accepted resize percentage.
pub const MIN_RESIZE_PERCENT: u32 = 1;

/// Largest accepted resize percentage.
pub const MAX_RESIZE_PERCENT: u32 = 500;

/// Errors that can occur while compressing an image.
#[derive(Debug, Error)]
pub enum CompressError {
    /// Quality outside 0..=100.
    #[error("Quality must be between 0 and 100, got {0}")]
    InvalidQuality(i64),

    /// Resize percentage outside 1..=500.
    #[error("Resize percentage must be between 1 and 500, got {0}")]
    InvalidResize(i64),

    /// The input could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] DecodeError),

    /// The resized candidate would not fit in memory.
    #[error("failed to resize image: {0}")]
    Resize(#[from] ResizeError),

    /// The processed image could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(#[from] EncodeError),
}

impl CompressError {
    /// True for out-of-range options, as opposed to problems with the image.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            CompressError::InvalidQuality(_) | CompressError::InvalidResize(_)
        )
    }
}

/// Settings for a single compression request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressOptions {
    /// Quality 0-100. JPEG quality, or the inverse of PNG effort.
    pub quality: u8,
    /// Target size as a percentage of the original; 100 keeps the size.
    pub resize_percent: u32,
    /// Filter used when resizing.
    pub algorithm: ResizeAlgorithm,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            quality: 80,
            resize_percent: NO_RESIZE_PERCENT,
            algorithm: ResizeAlgorithm::default(),
        }
    }
}

impl CompressOptions {
    /// Build options from raw host integers, validating their ranges.
    pub fn try_new(quality: i64, resize_percent: i64) -> Result<Self, CompressError> {
        let quality = u8::try_from(quality)
            .ok()
            .filter(|q| *q <= MAX_QUALITY)
            .ok_or(CompressError::InvalidQuality(quality))?;
        let resize_percent = u32::try_from(resize_percent)
            .ok()
            .filter(|p| (MIN_RESIZE_PERCENT..=MAX_RESIZE_PERCENT).contains(p))
            .ok_or(CompressError::InvalidResize(resize_percent))?;

        Ok(Self {
            quality,
            resize_percent,
            algorithm: ResizeAlgorithm::default(),
        })
    }

    /// Set the resize algorithm.
    pub fn with_algorithm(mut self, algorithm: ResizeAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Check ranges on options that did not come through [`Self::try_new`].
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.quality > MAX_QUALITY {
            return Err(CompressError::InvalidQuality(i64::from(self.quality)));
        }
        if !(MIN_RESIZE_PERCENT..=MAX_RESIZE_PERCENT).contains(&self.resize_percent) {
            return Err(CompressError::InvalidResize(i64::from(self.resize_percent)));
        }
        Ok(())
    }

    /// Whether a resized candidate should be produced.
    pub fn wants_resize(&self) -> bool {
        self.resize_percent != NO_RESIZE_PERCENT
    }
}

/// Encoded output of a compression request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// Format of `bytes`.
    pub format: OutputFormat,
    /// Width of the encoded image.
    pub width: u32,
    /// Height of the encoded image.
    pub height: u32,
    /// True when the resized candidate was kept.
    pub resized: bool,
}

impl CompressedImage {
    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Consume the result, keeping only the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Decode, optionally resize, and re-encode an image.
///
/// The output format follows the input: JPEG stays JPEG, PNG stays PNG, and
/// anything else becomes JPEG.
///
/// # Errors
///
/// Returns a validation error for out-of-range options, `CompressError::Decode`
/// if the input is not a readable image, `CompressError::Resize` if the
/// requested size would exceed the allocation budget, and
/// `CompressError::Encode` if every encode attempt failed.
pub fn compress(bytes: &[u8], options: &CompressOptions) -> Result<CompressedImage, CompressError> {
    options.validate()?;

    let decoded = decode_image(bytes)?;
    let format = decoded.format.output_format();
    let (width, height) = (decoded.width(), decoded.height());

    debug!(
        "compressing {} {}x{} as {} (quality {}, resize {}%)",
        decoded.format, width, height, format, options.quality, options.resize_percent
    );

    let resized_image = if options.wants_resize() {
        Some(resize_by_percent(
            &decoded.image,
            options.resize_percent,
            options.algorithm,
        )?)
    } else {
        None
    };

    let full = encode(&decoded.image, format, options.quality).map(|bytes| CompressedImage {
        bytes,
        format,
        width,
        height,
        resized: false,
    });

    let Some(resized_image) = resized_image else {
        return Ok(full?);
    };

    let resized = encode(&resized_image, format, options.quality).map(|bytes| CompressedImage {
        bytes,
        format,
        width: resized_image.width(),
        height: resized_image.height(),
        resized: true,
    });

    Ok(pick_smaller(full, resized)?)
}

/// Choose between the full-resolution and resized encodes.
///
/// The resized output is kept unless it is strictly larger. When only one
/// encode succeeded, that one is returned; when both failed, the
/// full-resolution error is.
fn pick_smaller(
    full: Result<CompressedImage, EncodeError>,
    resized: Result<CompressedImage, EncodeError>,
) -> Result<CompressedImage, EncodeError> {
    match (full, resized) {
        (Ok(full), Ok(resized)) => {
            if resized.len() > full.len() {
                debug!(
                    "resized output larger ({} > {} bytes), keeping full resolution",
                    resized.len(),
                    full.len()
                );
                Ok(full)
            } else {
                debug!(
                    "keeping resized output ({} <= {} bytes)",
                    resized.len(),
                    full.len()
                );
                Ok(resized)
            }
        }
        (Ok(full), Err(e)) => {
            warn!("resized encode failed, keeping full resolution: {e}");
            Ok(full)
        }
        (Err(e), Ok(resized)) => {
            warn!("full-resolution encode failed, keeping resized output: {e}");
            Ok(resized)
        }
        (Err(e), Err(_)) => Err(e),
    }
}
