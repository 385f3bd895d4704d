//! Image compression WASM bindings.
//!
//! This module exposes the pixsqueeze-core pipeline to JavaScript.
//!
//! # Functions
//!
//! - [`compress_image`] - Positional entry point returning the encoded bytes
//! - [`compress_image_detailed`] - Options-object entry point returning a [`JsCompressedImage`]
//! - [`detect_format`] - Report the container format of some bytes
//!
//! # Example
//!
//! ```typescript
//! import init, { compress_image, compress_image_detailed } from '@pixsqueeze/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const small = compress_image(bytes, 80, 50, 'CatmullRom');
//!
//! const result = compress_image_detailed(bytes, { quality: 80, resizePercent: 50 });
//! const blob = new Blob([result.bytes()], { type: result.mimeType });
//! ```

use crate::args::{options_from_js, request_from_js, RequestError};
use crate::types::JsCompressedImage;
use js_sys::Uint8Array;
use pixsqueeze_core::decode;
use pixsqueeze_core::{compress, CompressedImage};
use wasm_bindgen::prelude::*;

/// Human-readable message for a failed request.
///
/// Argument problems are reported as-is; anything that went wrong while
/// processing the image is prefixed so the host can tell the two apart.
pub(crate) fn error_message(err: &RequestError) -> String {
    if err.is_argument_error() {
        err.to_string()
    } else {
        format!("Image processing failed: {err}")
    }
}

fn to_js_error(err: &RequestError) -> JsValue {
    js_sys::Error::new(&error_message(err)).into()
}

fn compress_from_js(
    image_data: &JsValue,
    quality: &JsValue,
    resize_percent: &JsValue,
    algorithm: &JsValue,
) -> Result<CompressedImage, RequestError> {
    let request = request_from_js(image_data, quality, resize_percent, algorithm)?;
    Ok(compress(&request.bytes, &request.options)?)
}

/// Handler behind the `compressImageWASM` global.
///
/// Failures are returned as an `Error` object rather than thrown, so a host
/// written against the global can check the result with `instanceof Error`.
pub(crate) fn compress_image_global(
    image_data: JsValue,
    quality: JsValue,
    resize_percent: JsValue,
    algorithm: JsValue,
) -> JsValue {
    match compress_from_js(&image_data, &quality, &resize_percent, &algorithm) {
        Ok(result) => Uint8Array::from(result.bytes.as_slice()).into(),
        Err(err) => {
            log::warn!("{}", error_message(&err));
            to_js_error(&err)
        }
    }
}

/// Compress an image.
///
/// Decodes the bytes, optionally resizes, and re-encodes in the input's
/// format (JPEG stays JPEG, PNG stays PNG, anything else becomes JPEG). When
/// resizing, the result is never larger than a full-resolution recompression.
///
/// # Arguments
///
/// * `image_data` - Encoded image as a `Uint8Array` or `ArrayBuffer`
/// * `quality` - 0-100. JPEG quality; for PNG, higher means less compression effort
/// * `resize_percent` - 1-500, where 100 keeps the original size
/// * `algorithm` - Optional: `NearestNeighbor`, `ApproxBiLinear`, `BiLinear`
///   or `CatmullRom`. Anything else uses `BiLinear`.
///
/// # Errors
///
/// Throws an `Error` if:
/// - Fewer than three arguments were supplied
/// - An argument has the wrong type or is out of range
/// - The bytes are not a decodable image
/// - Encoding fails
///
/// # Example
///
/// ```typescript
/// const out = compress_image(bytes, 75, 100);
/// console.log(`${bytes.byteLength} -> ${out.byteLength} bytes`);
/// ```
#[wasm_bindgen]
pub fn compress_image(
    image_data: JsValue,
    quality: JsValue,
    resize_percent: JsValue,
    algorithm: JsValue,
) -> Result<Vec<u8>, JsValue> {
    compress_from_js(&image_data, &quality, &resize_percent, &algorithm)
        .map(CompressedImage::into_bytes)
        .map_err(|e| to_js_error(&e))
}

/// Compress an image using an options object.
///
/// # Arguments
///
/// * `bytes` - Encoded image bytes
/// * `options` - `{ quality?: number, resizePercent?: number, algorithm?: string }`.
///   Missing or `null` fields take their defaults (80, 100, `BiLinear`);
///   `undefined` uses all defaults. Numbers and algorithm names are handled
///   exactly like the positional arguments of [`compress_image`].
///
/// # Returns
///
/// A `JsCompressedImage` with the bytes, output MIME type and dimensions.
///
/// # Example
///
/// ```typescript
/// const result = compress_image_detailed(bytes, { quality: 60, resizePercent: 25 });
/// const blob = new Blob([result.bytes()], { type: result.mimeType });
/// ```
#[wasm_bindgen]
pub fn compress_image_detailed(
    bytes: &[u8],
    options: JsValue,
) -> Result<JsCompressedImage, JsValue> {
    let options = options_from_js(options).map_err(|e| to_js_error(&e))?;

    compress(bytes, &options)
        .map(JsCompressedImage::from)
        .map_err(|e| to_js_error(&RequestError::from(e)))
}

/// Detect the container format of encoded image bytes.
///
/// Returns `"jpeg"`, `"png"`, another short name such as `"gif"` or
/// `"bmp"`, or `"unknown"` when the bytes match no known format.
///
/// # Example
///
/// ```typescript
/// const isLossy = detect_format(bytes) === 'jpeg';
/// ```
#[wasm_bindgen]
pub fn detect_format(bytes: &[u8]) -> String {
    decode::detect_format(bytes)
        .map(|format| format.name())
        .unwrap_or("unknown")
        .to_string()
}
