//! Page visibility tracking for the frame sampler.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, VisibilityState};

use crate::dom;

const VISIBILITY_EVENT: &str = "visibilitychange";

/// Keeps a `visibilitychange` listener on the document alive.
///
/// Browsers stop animation frames while a tab is hidden; the callback lets the
/// sampler restart its clock instead of timing the whole pause as one frame.
pub struct VisibilityWatcher {
    document: Document,
    listener: Closure<dyn FnMut()>,
}

impl VisibilityWatcher {
    /// Attach `on_change`, which receives `true` when the page becomes visible.
    pub fn attach(mut on_change: impl FnMut(bool) + 'static) -> Option<Self> {
        let document = dom::document()?;
        let watched = document.clone();
        let listener = Closure::<dyn FnMut()>::new(move || {
            on_change(watched.visibility_state() == VisibilityState::Visible);
        });
        if let Err(err) = document
            .add_event_listener_with_callback(VISIBILITY_EVENT, listener.as_ref().unchecked_ref())
        {
            log::warn!(
                "visibility listener unavailable: {}",
                dom::js_error_message(&err)
            );
            return None;
        }
        Some(Self { document, listener })
    }
}

impl Drop for VisibilityWatcher {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            VISIBILITY_EVENT,
            self.listener.as_ref().unchecked_ref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_is_none_off_browser() {
        assert!(VisibilityWatcher::attach(|_| {}).is_none());
    }
}
