use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Window};

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    if cfg!(target_arch = "wasm32") {
        web_sys::window()
    } else {
        None
    }
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Read an optional property off a JS object, treating `undefined`/`null` as absent.
#[must_use]
pub fn reflect_get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Read an optional numeric property.
#[must_use]
pub fn reflect_number(target: &JsValue, key: &str) -> Option<f64> {
    reflect_get(target, key).and_then(|value| value.as_f64())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// High-resolution timestamp in milliseconds from `performance.now()`.
#[must_use]
pub fn now_ms() -> Option<f64> {
    window()
        .and_then(|win| win.performance())
        .map(|perf| perf.now())
}

/// Resolve on the next animation frame with its timestamp.
///
/// # Errors
/// Returns an error if no window is available, the frame cannot be requested,
/// or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn next_animation_frame() -> Result<f64, JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move |timestamp: f64| {
        let _ = resolve.call1(&JsValue::UNDEFINED, &JsValue::from_f64(timestamp));
    });

    win.request_animation_frame(closure.as_ref().unchecked_ref())?;
    closure.forget();

    let value = JsFuture::from(promise).await?;
    Ok(value.as_f64().unwrap_or_default())
}
