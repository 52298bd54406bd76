#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod app;
pub mod components;
pub mod dom;
pub mod frame_loop;
pub mod logging;
pub mod motion;
pub mod probe;
pub mod provider;
pub mod self_test;
pub mod visibility;

pub use probe::{BrowserProbe, ProbeHandle};
pub use provider::{PerformanceHandle, PerformanceProvider, use_performance};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
    yew::Renderer::<app::App>::new().render();
}
