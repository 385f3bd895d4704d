//! pixsqueeze WASM - WebAssembly bindings for pixsqueeze
//!
//! This crate exposes the pixsqueeze-core recompression pipeline to
//! JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `args` - Validation of loosely typed host arguments
//! - `compress` - Compression and format detection bindings
//! - `global` - Registration of the `compressImageWASM` global at startup
//! - `logging` - `log` backend writing to the browser console
//! - `types` - WASM-compatible wrapper types for results
//!
//! # Usage
//!
//! ```typescript
//! import init from '@pixsqueeze/wasm';
//!
//! // Initialize WASM module; this also registers globalThis.compressImageWASM
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compressImageWASM(bytes, 80, 50, 'BiLinear');
//! if (result instanceof Error) {
//!   console.error(result.message);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod args;
mod compress;
mod global;
mod logging;
mod types;

// Re-export public types
pub use compress::{compress_image, compress_image_detailed, detect_format};
pub use types::JsCompressedImage;

/// Initialize the WASM module (called automatically on load).
///
/// Installs the panic hook and console logger, publishes the global entry
/// point, and prints the readiness line.
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();
    global::register()?;
    web_sys::console::log_1(&JsValue::from_str(global::READY_MESSAGE));
    Ok(())
}

/// Set the console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
///
/// Returns `false` and leaves the level unchanged for unknown names.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match logging::parse_level(level) {
        Some(filter) => {
            log::set_max_level(filter);
            true
        }
        None => false,
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
