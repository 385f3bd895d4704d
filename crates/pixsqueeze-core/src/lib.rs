//! pixsqueeze Core - image recompression library
//!
//! This crate provides the decode → resize → re-encode pipeline behind the
//! pixsqueeze WebAssembly module: container detection, percentage resizing
//! that keeps the pixel layout, JPEG/PNG encoding from a single 0-100
//! quality knob, and the policy that never returns a resized file larger
//! than a plain recompression.

pub mod compress;
pub mod decode;
pub mod encode;

pub use compress::{
    compress, CompressError, CompressOptions, CompressedImage, MAX_QUALITY, MAX_RESIZE_PERCENT,
    MIN_RESIZE_PERCENT,
};
pub use decode::{ContainerFormat, OutputFormat, ResizeAlgorithm};
