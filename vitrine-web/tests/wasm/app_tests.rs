use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement, HtmlSelectElement};
use yew::Renderer;

use vitrine_perf::{EnvironmentSignals, NetworkClass};
use vitrine_web::ProbeHandle;
use vitrine_web::app::{App, Props};
use vitrine_web::dom;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

fn render_app() {
    let probe = ProbeHandle::fixed(
        EnvironmentSignals::default()
            .with_cores(8)
            .with_memory_gb(8.0)
            .with_network(NetworkClass::FourG),
    );
    Renderer::<App>::with_root_and_props(
        ensure_app_root(),
        Props {
            probe,
            sample_frames: false,
        },
    )
    .render();
}

async fn settle() {
    let _ = dom::next_animation_frame().await;
    let _ = dom::next_animation_frame().await;
}

fn query(selector: &str) -> web_sys::Element {
    dom::document()
        .expect("document")
        .query_selector(selector)
        .expect("query")
        .unwrap_or_else(|| panic!("{selector} present"))
}

#[wasm_bindgen_test]
async fn skip_link_points_to_main_landmark() {
    render_app();
    settle().await;
    let skip = query("a[href='#main']");
    assert!(skip.class_list().contains("sr-only"));
    query("main#main");
}

#[wasm_bindgen_test]
async fn toggle_opens_panel_and_tier_select_applies_override() {
    render_app();
    settle().await;
    query("#perf-toggle")
        .dyn_into::<HtmlElement>()
        .expect("toggle button")
        .click();
    settle().await;

    let select: HtmlSelectElement = query("#perf-tier").dyn_into().expect("tier select");
    select.set_value("low");
    select
        .dispatch_event(&Event::new("change").expect("event"))
        .expect("dispatch change");
    settle().await;

    assert!(query(".perf-indicator").class_list().contains("perf-indicator--low"));
    let html = dom::document()
        .and_then(|doc| doc.document_element())
        .expect("root element");
    assert!(html.class_list().contains("quality-low"));

    query("#perf-reset")
        .dyn_into::<HtmlElement>()
        .expect("reset button")
        .click();
    settle().await;
    assert!(query(".perf-indicator").class_list().contains("perf-indicator--high"));
}

#[wasm_bindgen_test]
fn frame_timing_is_available_in_browser() {
    assert!(vitrine_web::frame_loop::probe_frame_timing().is_available());
}

#[wasm_bindgen_test]
async fn frame_loop_delivers_timestamps_until_dropped() {
    use std::cell::Cell;
    use std::rc::Rc;

    let count = Rc::new(Cell::new(0_u32));
    let win = dom::window().expect("window");
    let frame_loop = {
        let count = Rc::clone(&count);
        vitrine_web::frame_loop::FrameLoop::start(win, move |_| count.set(count.get() + 1))
            .expect("start loop")
    };
    for _ in 0..5 {
        let _ = dom::next_animation_frame().await;
    }
    assert!(count.get() >= 3);
    drop(frame_loop);
    let seen = count.get();
    settle().await;
    assert_eq!(count.get(), seen);
}
