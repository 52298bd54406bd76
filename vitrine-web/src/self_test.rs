//! On-demand device self-test shown in the settings panel.
//!
//! Runs entirely off the governor: readings are scored for display only and
//! never change the active policy.

use vitrine_perf::numbers::u32_to_f64;
use vitrine_perf::{BenchmarkReadings, DeviceScore};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;

const FPS_WINDOW_MS: f64 = 1000.0;
const BYTES_PER_MB: f64 = 1_048_576.0;
const RENDER_BURST_SPANS: usize = 1000;

/// Count animation frames delivered during one second.
///
/// # Errors
/// Propagates failures to schedule or resolve an animation frame.
#[allow(clippy::future_not_send)]
pub async fn measure_fps() -> Result<f64, JsValue> {
    let start = dom::now_ms().ok_or_else(|| JsValue::from_str("performance clock unavailable"))?;
    let mut frames: u32 = 0;
    loop {
        let timestamp = dom::next_animation_frame().await?;
        frames += 1;
        if timestamp - start >= FPS_WINDOW_MS {
            break;
        }
    }
    Ok(u32_to_f64(frames))
}

/// JS heap in use, in MB. Zero where `performance.memory` is not exposed.
#[must_use]
pub fn measure_memory_mb() -> f64 {
    dom::window()
        .and_then(|win| win.performance())
        .and_then(|perf| dom::reflect_get(perf.as_ref(), "memory"))
        .and_then(|memory| dom::reflect_number(&memory, "usedJSHeapSize"))
        .map_or(0.0, |bytes| (bytes / BYTES_PER_MB).round())
}

/// Time from requesting a heavy DOM insert to the frame after it lands.
///
/// # Errors
/// Returns an error if the document is unavailable or DOM calls throw.
#[allow(clippy::future_not_send)]
pub async fn measure_render_ms() -> Result<f64, JsValue> {
    let doc = dom::document().ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("document body unavailable"))?;
    let start = dom::now_ms().ok_or_else(|| JsValue::from_str("performance clock unavailable"))?;

    dom::next_animation_frame().await?;
    let burst = doc.create_element("div")?;
    burst.set_inner_html(&"<span>Test</span>".repeat(RENDER_BURST_SPANS));
    burst.set_attribute("aria-hidden", "true")?;
    if let Some(el) = burst.dyn_ref::<web_sys::HtmlElement>() {
        el.style()
            .set_property("transform", "rotate(45deg) scale(1.2)")?;
    }
    body.append_child(&burst)?;

    let end = dom::next_animation_frame().await?;
    burst.remove();
    Ok(end - start)
}

/// Run all three measurements in sequence.
///
/// # Errors
/// Returns the first measurement failure.
#[allow(clippy::future_not_send)]
pub async fn run_self_test() -> Result<BenchmarkReadings, JsValue> {
    let fps = measure_fps().await?;
    let memory_used_mb = measure_memory_mb();
    let render_ms = measure_render_ms().await?;
    let readings = BenchmarkReadings {
        fps,
        memory_used_mb,
        render_ms,
    };
    log::info!(
        "self-test: {fps} fps, {memory_used_mb} MB heap, {render_ms:.1} ms render, score {}",
        DeviceScore::from_readings(&readings).total()
    );
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reads_zero_off_browser() {
        assert!(measure_memory_mb().abs() < f64::EPSILON);
    }
}
