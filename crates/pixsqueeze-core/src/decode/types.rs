//! Core types for image decoding and resampling.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use image::{DynamicImage, ImageError, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("Empty image data")]
    Empty,

    /// The file format is not recognized.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The format was recognized but no decoder is available for it.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoder refused to allocate the image buffer.
    #[error("Out of memory during decoding: {0}")]
    OutOfMemory(String),
}

impl From<ImageError> for DecodeError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Unsupported(e) => DecodeError::UnsupportedFormat(e.to_string()),
            ImageError::Limits(e) => DecodeError::OutOfMemory(e.to_string()),
            other => DecodeError::CorruptedFile(other.to_string()),
        }
    }
}

/// Error types for resampling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// The target buffer would not fit in the allocation budget.
    #[error("Resized image {width}x{height} exceeds the memory limit of {limit} bytes")]
    TooLarge { width: u32, height: u32, limit: u64 },
}

/// Container format detected from the input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// JPEG/JFIF.
    Jpeg,
    /// PNG.
    Png,
    /// Anything else the decoder understands (GIF, BMP, ...).
    Other(ImageFormat),
}

impl ContainerFormat {
    /// Short lowercase name, e.g. `"jpeg"`, `"png"`, `"gif"`.
    pub fn name(self) -> &'static str {
        match self {
            ContainerFormat::Jpeg => "jpeg",
            ContainerFormat::Png => "png",
            ContainerFormat::Other(format) => format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("unknown"),
        }
    }

    /// The format an image of this container is re-encoded as.
    ///
    /// JPEG and PNG keep their format; everything else becomes JPEG.
    pub fn output_format(self) -> OutputFormat {
        match self {
            ContainerFormat::Png => OutputFormat::Png,
            ContainerFormat::Jpeg | ContainerFormat::Other(_) => OutputFormat::Jpeg,
        }
    }
}

impl From<ImageFormat> for ContainerFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => ContainerFormat::Jpeg,
            ImageFormat::Png => ContainerFormat::Png,
            other => ContainerFormat::Other(other),
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formats the encoder can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG, quality passed through.
    Jpeg,
    /// Lossless PNG, quality mapped to a compression effort.
    Png,
}

impl OutputFormat {
    /// MIME type for labelling the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }

    /// Conventional file extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jpeg => f.write_str("JPEG"),
            OutputFormat::Png => f.write_str("PNG"),
        }
    }
}

/// Resampling filter family used when resizing.
///
/// Names match the selector strings accepted from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ResizeAlgorithm {
    /// Nearest neighbor (fastest, blocky).
    NearestNeighbor,
    /// Fast approximation of bilinear.
    ApproxBiLinear,
    /// Bilinear interpolation (balance of speed and quality).
    #[default]
    BiLinear,
    /// Catmull-Rom cubic (sharpest, slowest).
    CatmullRom,
}

impl ResizeAlgorithm {
    /// All selectable algorithms.
    pub const ALL: [ResizeAlgorithm; 4] = [
        ResizeAlgorithm::NearestNeighbor,
        ResizeAlgorithm::ApproxBiLinear,
        ResizeAlgorithm::BiLinear,
        ResizeAlgorithm::CatmullRom,
    ];

    /// Look up an algorithm by selector name.
    ///
    /// Unknown names fall back to [`ResizeAlgorithm::BiLinear`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "NearestNeighbor" => ResizeAlgorithm::NearestNeighbor,
            "ApproxBiLinear" => ResizeAlgorithm::ApproxBiLinear,
            "BiLinear" => ResizeAlgorithm::BiLinear,
            "CatmullRom" => ResizeAlgorithm::CatmullRom,
            _ => ResizeAlgorithm::default(),
        }
    }

    /// Selector name of this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            ResizeAlgorithm::NearestNeighbor => "NearestNeighbor",
            ResizeAlgorithm::ApproxBiLinear => "ApproxBiLinear",
            ResizeAlgorithm::BiLinear => "BiLinear",
            ResizeAlgorithm::CatmullRom => "CatmullRom",
        }
    }

    /// Convert to the image crate's FilterType.
    ///
    /// The image crate has a single triangle filter, so both bilinear
    /// variants resolve to it.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeAlgorithm::NearestNeighbor => image::imageops::FilterType::Nearest,
            ResizeAlgorithm::ApproxBiLinear | ResizeAlgorithm::BiLinear => {
                image::imageops::FilterType::Triangle
            }
            ResizeAlgorithm::CatmullRom => image::imageops::FilterType::CatmullRom,
        }
    }
}

impl From<String> for ResizeAlgorithm {
    fn from(name: String) -> Self {
        ResizeAlgorithm::from_name(&name)
    }
}

impl FromStr for ResizeAlgorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ResizeAlgorithm::from_name(s))
    }
}

impl fmt::Display for ResizeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Concrete in-memory pixel layouts that survive a resize unchanged.
///
/// Decoded images in any other layout (floating point samples) are resized
/// into [`PixelClass::Rgba8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    /// 8-bit grayscale.
    L8,
    /// 8-bit grayscale with alpha.
    La8,
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGBA, straight alpha.
    Rgba8,
    /// 16-bit grayscale.
    L16,
    /// 16-bit grayscale with alpha.
    La16,
    /// 16-bit RGB.
    Rgb16,
    /// 16-bit RGBA, straight alpha.
    Rgba16,
}

impl PixelClass {
    /// Classify a decoded image, or `None` for layouts with no preserved class.
    pub fn of(image: &DynamicImage) -> Option<Self> {
        match image {
            DynamicImage::ImageLuma8(_) => Some(PixelClass::L8),
            DynamicImage::ImageLumaA8(_) => Some(PixelClass::La8),
            DynamicImage::ImageRgb8(_) => Some(PixelClass::Rgb8),
            DynamicImage::ImageRgba8(_) => Some(PixelClass::Rgba8),
            DynamicImage::ImageLuma16(_) => Some(PixelClass::L16),
            DynamicImage::ImageLumaA16(_) => Some(PixelClass::La16),
            DynamicImage::ImageRgb16(_) => Some(PixelClass::Rgb16),
            DynamicImage::ImageRgba16(_) => Some(PixelClass::Rgba16),
            _ => None,
        }
    }

    /// True for the single-channel (plus optional alpha) classes.
    pub fn is_grayscale(self) -> bool {
        matches!(
            self,
            PixelClass::L8 | PixelClass::La8 | PixelClass::L16 | PixelClass::La16
        )
    }
}

/// A decoded image together with the container it came from.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Decoded pixels in their native layout.
    pub image: DynamicImage,
    /// Detected container format.
    pub format: ContainerFormat,
}

impl DecodedImage {
    /// Create a new DecodedImage.
    pub fn new(image: DynamicImage, format: ContainerFormat) -> Self {
        Self { image, format }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_filter_conversion() {
        assert!(matches!(
            ResizeAlgorithm::NearestNeighbor.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            ResizeAlgorithm::ApproxBiLinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            ResizeAlgorithm::BiLinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            ResizeAlgorithm::CatmullRom.to_image_filter(),
            image::imageops::FilterType::CatmullRom
        ));
    }

    #[test]
    fn test_algorithm_from_name() {
        for algorithm in ResizeAlgorithm::ALL {
            assert_eq!(ResizeAlgorithm::from_name(algorithm.name()), algorithm);
        }
    }

    #[test]
    fn test_algorithm_unknown_falls_back_to_bilinear() {
        assert_eq!(ResizeAlgorithm::from_name("Lanczos3"), ResizeAlgorithm::BiLinear);
        assert_eq!(ResizeAlgorithm::from_name(""), ResizeAlgorithm::BiLinear);
        // Names are case-sensitive
        assert_eq!(ResizeAlgorithm::from_name("catmullrom"), ResizeAlgorithm::BiLinear);
        assert_eq!("bogus".parse::<ResizeAlgorithm>(), Ok(ResizeAlgorithm::BiLinear));
    }

    #[test]
    fn test_container_format_normalization() {
        assert_eq!(ContainerFormat::Jpeg.output_format(), OutputFormat::Jpeg);
        assert_eq!(ContainerFormat::Png.output_format(), OutputFormat::Png);
        assert_eq!(
            ContainerFormat::Other(ImageFormat::Gif).output_format(),
            OutputFormat::Jpeg
        );
    }

    #[test]
    fn test_container_format_from_image_format() {
        assert_eq!(ContainerFormat::from(ImageFormat::Jpeg), ContainerFormat::Jpeg);
        assert_eq!(ContainerFormat::from(ImageFormat::Png), ContainerFormat::Png);
        assert_eq!(
            ContainerFormat::from(ImageFormat::Bmp),
            ContainerFormat::Other(ImageFormat::Bmp)
        );
        assert_eq!(ContainerFormat::Other(ImageFormat::Bmp).name(), "bmp");
        assert_eq!(ContainerFormat::Jpeg.to_string(), "jpeg");
    }

    #[test]
    fn test_output_format_labels() {
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.to_string(), "PNG");
    }

    #[test]
    fn test_pixel_class_of() {
        let gray = DynamicImage::new_luma8(2, 2);
        assert_eq!(PixelClass::of(&gray), Some(PixelClass::L8));
        assert!(PixelClass::L8.is_grayscale());

        let rgba16 = DynamicImage::new_rgba16(2, 2);
        assert_eq!(PixelClass::of(&rgba16), Some(PixelClass::Rgba16));
        assert!(!PixelClass::Rgba16.is_grayscale());

        let float = DynamicImage::new_rgb32f(2, 2);
        assert_eq!(PixelClass::of(&float), None);
    }

    #[test]
    fn test_decoded_image_accessors() {
        let img = DecodedImage::new(DynamicImage::new_rgb8(100, 50), ContainerFormat::Png);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(PixelClass::of(&img.image), Some(PixelClass::Rgb8));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("unexpected EOF".to_string());
        assert_eq!(
            err.to_string(),
            "Corrupted or incomplete image file: unexpected EOF"
        );

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
        let err = ResizeError::TooLarge {
            width: 20000,
            height: 15000,
            limit: 536_870_912,
        };
        assert_eq!(
            err.to_string(),
            "Resized image 20000x15000 exceeds the memory limit of 536870912 bytes"
        );
    }
}
