//! One-time registration of the compressor on the host's global object.

use wasm_bindgen::prelude::*;

use crate::compress::compress_image_global;

/// Name the handler is published under on `globalThis`.
pub(crate) const GLOBAL_NAME: &str = "compressImageWASM";

/// Line written to the console once the module is ready.
pub(crate) const READY_MESSAGE: &str = "pixsqueeze WebAssembly image compressor initialized";

/// Publish `compressImageWASM(imageData, quality, resize[, algorithm])`.
///
/// The closure is leaked so the global stays callable for the lifetime of
/// the module.
pub(crate) fn register() -> Result<(), JsValue> {
    let handler = Closure::<dyn Fn(JsValue, JsValue, JsValue, JsValue) -> JsValue>::new(
        compress_image_global,
    );

    js_sys::Reflect::set(
        &js_sys::global(),
        &JsValue::from_str(GLOBAL_NAME),
        handler.as_ref(),
    )?;
    handler.forget();

    log::debug!("registered globalThis.{GLOBAL_NAME}");
    Ok(())
}
