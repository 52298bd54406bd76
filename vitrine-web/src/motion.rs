//! Live subscription to the reduced-motion media query.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::a11y::REDUCED_MOTION_QUERY;
use crate::dom;

/// Keeps a `change` listener on `(prefers-reduced-motion: reduce)` alive.
///
/// The listener is detached when the watcher is dropped.
pub struct ReducedMotionWatcher {
    query: MediaQueryList,
    listener: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl ReducedMotionWatcher {
    /// Attach `on_change`, which receives the new preference on every flip.
    ///
    /// Returns `None` when the host has no `matchMedia` or refuses the listener.
    pub fn attach(mut on_change: impl FnMut(bool) + 'static) -> Option<Self> {
        let query = dom::window()?.match_media(REDUCED_MOTION_QUERY).ok()??;
        let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| on_change(event.matches()),
        );
        if let Err(err) =
            query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        {
            log::warn!(
                "reduced-motion listener unavailable: {}",
                dom::js_error_message(&err)
            );
            return None;
        }
        Some(Self { query, listener })
    }

    /// Preference at the time of the call.
    #[must_use]
    pub fn current(&self) -> bool {
        self.query.matches()
    }
}

impl Drop for ReducedMotionWatcher {
    fn drop(&mut self) {
        let _ = self
            .query
            .remove_event_listener_with_callback("change", self.listener.as_ref().unchecked_ref());
    }
}
