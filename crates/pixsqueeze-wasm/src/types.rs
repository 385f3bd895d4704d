//! WASM-compatible wrapper types for compression results.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! pixsqueeze types, handling the conversion between Rust and JavaScript
//! data representations.

use pixsqueeze_core::{CompressedImage, OutputFormat};
use wasm_bindgen::prelude::*;

/// A compressed image wrapper for JavaScript.
///
/// Carries the encoded bytes plus what the host needs to label them: the
/// output format (which differs from the input for non-JPEG/PNG sources),
/// the final dimensions, and whether the resized candidate won.
///
/// # Memory Management
///
/// The bytes are stored in WASM memory. When you call `bytes()`, a copy is
/// made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsCompressedImage {
    inner: CompressedImage,
}

#[wasm_bindgen]
impl JsCompressedImage {
    /// Get the encoded image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the encoded image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of encoded bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// Output format name: `"jpeg"` or `"png"`
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        match self.inner.format {
            OutputFormat::Jpeg => "jpeg".to_string(),
            OutputFormat::Png => "png".to_string(),
        }
    }

    /// MIME type for building a `Blob` from the bytes
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    /// Conventional file extension for the output, without the dot
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.format.extension().to_string()
    }

    /// Whether the resized candidate was smaller and therefore kept
    #[wasm_bindgen(getter)]
    pub fn resized(&self) -> bool {
        self.inner.resized
    }

    /// Returns the encoded bytes as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl From<CompressedImage> for JsCompressedImage {
    fn from(inner: CompressedImage) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(format: OutputFormat, resized: bool) -> JsCompressedImage {
        JsCompressedImage::from(CompressedImage {
            bytes: vec![1, 2, 3, 4],
            format,
            width: 20,
            height: 10,
            resized,
        })
    }

    #[test]
    fn test_js_compressed_image_getters() {
        let img = sample(OutputFormat::Png, true);
        assert_eq!(img.width(), 20);
        assert_eq!(img.height(), 10);
        assert_eq!(img.byte_length(), 4);
        assert_eq!(img.bytes(), vec![1, 2, 3, 4]);
        assert!(img.resized());
    }

    #[test]
    fn test_js_compressed_image_format_labels() {
        let png = sample(OutputFormat::Png, false);
        assert_eq!(png.format(), "png");
        assert_eq!(png.mime_type(), "image/png");
        assert_eq!(png.extension(), "png");

        let jpeg = sample(OutputFormat::Jpeg, false);
        assert_eq!(jpeg.format(), "jpeg");
        assert_eq!(jpeg.mime_type(), "image/jpeg");
        assert_eq!(jpeg.extension(), "jpg");
    }
}
