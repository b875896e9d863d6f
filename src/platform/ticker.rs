//! Cancellable display refresh (WASM only)

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// A running `setInterval`
///
/// The interval is cleared when the ticker is dropped, so holding it in an
/// `Option` and setting that to `None` stops the callbacks.
pub struct Ticker {
    id: i32,
    // Kept alive for as long as the interval can fire
    _closure: Closure<dyn FnMut()>,
}

impl Ticker {
    /// Call `f` every `interval_ms`
    pub fn start(interval_ms: u32, f: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut()>::new(f);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms as i32,
        )?;
        log::debug!("ticker {} armed ({} ms)", id, interval_ms);
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.id);
            log::debug!("ticker {} cleared", self.id);
        }
    }
}
