//! Image decoding and resampling for pixsqueeze.
//!
//! This module provides functionality for:
//! - Detecting the container format (JPEG, PNG, or other) from magic bytes
//! - Decoding bytes into a pixel buffer in its native layout
//! - Percentage-based resizing that preserves the pixel layout
//!
//! # Architecture
//!
//! The pipeline is designed to be called from the WASM bindings, one request
//! per call. All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use pixsqueeze_core::decode::{decode_image, resize_by_percent, ResizeAlgorithm};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let decoded = decode_image(&bytes).unwrap();
//! let half = resize_by_percent(&decoded.image, 50, ResizeAlgorithm::CatmullRom).unwrap();
//! println!("{} -> {}x{}", decoded.format, half.width(), half.height());
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, detect_format};
pub use resize::{
    check_resize_budget, resize_by_percent, scale_dimension, scaled_dimensions,
    NO_RESIZE_PERCENT,
};
pub use types::{
    ContainerFormat, DecodeError, DecodedImage, OutputFormat, PixelClass, ResizeAlgorithm,
    ResizeError,
};
