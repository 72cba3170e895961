use wasm_bindgen::JsCast;

/// Runs `f` once after `duration`, giving freshly rendered canvases time to
/// reach the DOM.
pub fn set_timeout(f: impl FnMut() + 'static, duration: std::time::Duration) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = wasm_bindgen::closure::Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    if let Err(err) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        duration.as_millis() as i32,
    ) {
        tracing::warn!("setTimeout failed: {:?}", err);
    }
    callback.forget();
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(message) {
            tracing::warn!("alert failed: {:?}", err);
        }
    }
}
