//! Conversion of loosely typed host arguments into a compression request.
//!
//! The host may call with missing arguments (they arrive as `undefined`) or
//! with values of the wrong type. Everything is checked here, before any
//! image work starts, so the pipeline only ever sees validated options.
//!
//! Both entry points share the same number handling: finite numbers are
//! truncated toward zero, `null` counts as absent, and an absent or unknown
//! algorithm name selects bilinear.

use js_sys::{ArrayBuffer, Uint8Array};
use pixsqueeze_core::{CompressError, CompressOptions, ResizeAlgorithm};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Number of required positional arguments.
pub(crate) const REQUIRED_ARGUMENTS: usize = 3;

/// Errors raised while handling a host request.
#[derive(Debug, Error)]
pub(crate) enum RequestError {
    /// The caller passed fewer positional arguments than required.
    #[error("Expected 3 arguments: imageData, quality, and resize percentage")]
    MissingArguments { actual: usize },

    /// An argument was present but had the wrong type.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error(transparent)]
    Compress(#[from] CompressError),
}

impl RequestError {
    /// True for errors caused by the caller's arguments rather than the image.
    pub(crate) fn is_argument_error(&self) -> bool {
        match self {
            RequestError::MissingArguments { .. } | RequestError::InvalidArgument { .. } => true,
            RequestError::Compress(err) => err.is_validation_error(),
        }
    }
}

/// A validated request ready for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompressRequest {
    pub bytes: Vec<u8>,
    pub options: CompressOptions,
}

/// The options object accepted by `compress_image_detailed`.
///
/// Fields are kept loose (`f64`, optional) so they go through the same
/// conversion as positional arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct OptionsObject {
    pub quality: Option<f64>,
    pub resize_percent: Option<f64>,
    pub algorithm: Option<String>,
}

impl OptionsObject {
    /// Validate the object, filling absent fields with their defaults.
    pub(crate) fn into_options(self) -> Result<CompressOptions, RequestError> {
        let defaults = CompressOptions::default();
        options_from_numbers(
            self.quality.unwrap_or(f64::from(defaults.quality)),
            self.resize_percent
                .unwrap_or(f64::from(defaults.resize_percent)),
            self.algorithm.as_deref(),
        )
    }
}

/// Build a request from already-unwrapped host values.
///
/// `None` means the argument was not supplied.
pub(crate) fn build_request(
    bytes: Option<Vec<u8>>,
    quality: Option<f64>,
    resize_percent: Option<f64>,
    algorithm: Option<String>,
) -> Result<CompressRequest, RequestError> {
    let (bytes, quality, resize_percent) = match (bytes, quality, resize_percent) {
        (Some(bytes), Some(quality), Some(resize_percent)) => (bytes, quality, resize_percent),
        (bytes, quality, resize_percent) => {
            let actual = usize::from(bytes.is_some())
                + usize::from(quality.is_some())
                + usize::from(resize_percent.is_some());
            debug_assert!(actual < REQUIRED_ARGUMENTS);
            return Err(RequestError::MissingArguments { actual });
        }
    };

    let options = options_from_numbers(quality, resize_percent, algorithm.as_deref())?;
    Ok(CompressRequest { bytes, options })
}

/// Unwrap raw `JsValue` arguments and build a request.
pub(crate) fn request_from_js(
    image_data: &JsValue,
    quality: &JsValue,
    resize_percent: &JsValue,
    algorithm: &JsValue,
) -> Result<CompressRequest, RequestError> {
    build_request(
        bytes_from_js(image_data)?,
        number_from_js("quality", quality)?,
        number_from_js("resize", resize_percent)?,
        algorithm.as_string(),
    )
}

/// Deserialize an options object; `undefined` and `null` give the defaults.
pub(crate) fn options_from_js(options: JsValue) -> Result<CompressOptions, RequestError> {
    if is_missing(&options) {
        return Ok(CompressOptions::default());
    }
    let object: OptionsObject =
        serde_wasm_bindgen::from_value(options).map_err(|e| RequestError::InvalidArgument {
            name: "options",
            reason: e.to_string(),
        })?;
    object.into_options()
}

fn options_from_numbers(
    quality: f64,
    resize_percent: f64,
    algorithm: Option<&str>,
) -> Result<CompressOptions, RequestError> {
    let quality = integer_argument("quality", quality)?;
    let resize_percent = integer_argument("resize", resize_percent)?;
    let algorithm = algorithm
        .map(ResizeAlgorithm::from_name)
        .unwrap_or_default();

    Ok(CompressOptions::try_new(quality, resize_percent)?.with_algorithm(algorithm))
}

fn integer_argument(name: &'static str, value: f64) -> Result<i64, RequestError> {
    if !value.is_finite() {
        return Err(RequestError::InvalidArgument {
            name,
            reason: format!("expected a finite number, got {value}"),
        });
    }
    // Saturating float-to-int cast; range checks happen in CompressOptions
    Ok(value.trunc() as i64)
}

fn is_missing(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

fn bytes_from_js(value: &JsValue) -> Result<Option<Vec<u8>>, RequestError> {
    if is_missing(value) {
        return Ok(None);
    }
    if let Some(array) = value.dyn_ref::<Uint8Array>() {
        return Ok(Some(array.to_vec()));
    }
    if let Some(buffer) = value.dyn_ref::<ArrayBuffer>() {
        return Ok(Some(Uint8Array::new(buffer).to_vec()));
    }
    Err(RequestError::InvalidArgument {
        name: "imageData",
        reason: "expected a Uint8Array or ArrayBuffer".to_string(),
    })
}

fn number_from_js(name: &'static str, value: &JsValue) -> Result<Option<f64>, RequestError> {
    if is_missing(value) {
        return Ok(None);
    }
    value
        .as_f64()
        .map(Some)
        .ok_or_else(|| RequestError::InvalidArgument {
            name,
            reason: "expected a number".to_string(),
        })
}
