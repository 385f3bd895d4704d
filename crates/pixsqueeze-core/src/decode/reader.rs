//! Container detection and decoding via the `image` crate.

use std::io::Cursor;

use image::ImageReader;
use log::debug;

use super::{ContainerFormat, DecodeError, DecodedImage};

/// Decode an image from bytes, detecting its container format from content.
///
/// The file extension or MIME type the host may know about is ignored; only
/// the magic bytes decide the format.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for empty input,
/// `DecodeError::InvalidFormat` if the bytes are not a recognized image,
/// and `DecodeError::CorruptedFile` if decoding fails partway.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader
        .format()
        .map(ContainerFormat::from)
        .ok_or(DecodeError::InvalidFormat)?;

    let image = reader.decode()?;

    debug!(
        "decoded {} image {}x{} ({:?})",
        format,
        image.width(),
        image.height(),
        image.color()
    );

    Ok(DecodedImage::new(image, format))
}

/// Detect the container format without decoding pixels.
///
/// Returns `None` when the magic bytes match no known format.
pub fn detect_format(bytes: &[u8]) -> Option<ContainerFormat> {
    image::guess_format(bytes).ok().map(ContainerFormat::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    fn encode_as(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).unwrap();
        buffer.into_inner()
    }

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(8, 4, |x, y| {
            Rgb([(x * 30) as u8, (y * 60) as u8, 128])
        }))
    }

    #[test]
    fn test_decode_png() {
        let bytes = encode_as(&test_image(), ImageFormat::Png);
        let decoded = decode_image(&bytes).unwrap();

        assert_eq!(decoded.format, ContainerFormat::Png);
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 4);
        // PNG is lossless, pixels survive exactly
        assert_eq!(decoded.image.to_rgb8(), test_image().to_rgb8());
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encode_as(&test_image(), ImageFormat::Jpeg);
        let decoded = decode_image(&bytes).unwrap();

        assert_eq!(decoded.format, ContainerFormat::Jpeg);
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn test_decode_bmp_is_other() {
        let bytes = encode_as(&test_image(), ImageFormat::Bmp);
        let decoded = decode_image(&bytes).unwrap();

        assert_eq!(decoded.format, ContainerFormat::Other(ImageFormat::Bmp));
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn test_decode_preserves_pixel_class() {
        let gray = DynamicImage::new_luma16(4, 4);
        let bytes = encode_as(&gray, ImageFormat::Png);
        let decoded = decode_image(&bytes).unwrap();

        assert!(matches!(decoded.image, DynamicImage::ImageLuma16(_)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode_as(&test_image(), ImageFormat::Png);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_detect_format() {
        let png = encode_as(&test_image(), ImageFormat::Png);
        let jpeg = encode_as(&test_image(), ImageFormat::Jpeg);

        assert_eq!(detect_format(&png), Some(ContainerFormat::Png));
        assert_eq!(detect_format(&jpeg), Some(ContainerFormat::Jpeg));
        assert_eq!(detect_format(&[0x00, 0x01]), None);
    }
}
