//! Recurring `requestAnimationFrame` driver feeding the governor.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vitrine_perf::Capability;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::dom;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Whether the host can pace frames at all.
///
/// Without `requestAnimationFrame` the governor simply never samples and the
/// detected tier stays in force.
#[must_use]
pub fn probe_frame_timing() -> Capability<Window> {
    dom::window()
        .filter(|win| {
            dom::reflect_get(win.as_ref(), "requestAnimationFrame")
                .is_some_and(|value| value.is_function())
        })
        .into()
}

/// Owns a self-rescheduling animation-frame callback.
///
/// Dropping the loop cancels the pending frame and releases the closure.
pub struct FrameLoop {
    window: Window,
    pending: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Start calling `on_frame` with each frame timestamp in milliseconds.
    ///
    /// # Errors
    /// Returns the JavaScript error if the first frame cannot be requested.
    pub fn start(window: Window, mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let stopped = Rc::new(Cell::new(false));

        let closure = {
            let callback = Rc::clone(&callback);
            let pending = Rc::clone(&pending);
            let stopped = Rc::clone(&stopped);
            let win = window.clone();
            Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
                pending.set(None);
                if stopped.get() {
                    return;
                }
                on_frame(timestamp);
                if stopped.get() {
                    return;
                }
                if let Some(next) = callback.borrow().as_ref() {
                    match win.request_animation_frame(next.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(Some(id)),
                        Err(err) => {
                            log::warn!("frame loop halted: {}", dom::js_error_message(&err));
                        }
                    }
                }
            })
        };

        let first = window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        pending.set(Some(first));
        *callback.borrow_mut() = Some(closure);

        Ok(Self {
            window,
            pending,
            stopped,
            callback,
        })
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stopped.set(true);
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}
