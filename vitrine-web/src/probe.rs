//! Browser-backed environment probe.
//!
//! Every signal is optional: a missing API, a thrown getter or a non-browser
//! target all collapse to "unknown" and let the detector's fallbacks apply.

use std::fmt;
use std::rc::Rc;

use vitrine_perf::numbers::round_f64_to_u32;
use vitrine_perf::{Capability, EnvironmentProbe, EnvironmentSignals, FormFactor, NetworkClass};
use wasm_bindgen::JsValue;

use crate::a11y::REDUCED_MOTION_QUERY;
use crate::dom;

/// Reads device signals from `navigator` and `matchMedia`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BrowserProbe;

impl BrowserProbe {
    fn logical_cores(navigator: &web_sys::Navigator) -> Option<u32> {
        let raw = navigator.hardware_concurrency();
        (raw.is_finite() && raw >= 1.0).then(|| round_f64_to_u32(raw))
    }

    fn device_memory(navigator: &JsValue) -> Option<f64> {
        dom::reflect_number(navigator, "deviceMemory").filter(|gb| gb.is_finite() && *gb > 0.0)
    }

    fn network(navigator: &JsValue) -> NetworkClass {
        dom::reflect_get(navigator, "connection")
            .and_then(|conn| dom::reflect_get(&conn, "effectiveType"))
            .and_then(|kind| kind.as_string())
            .map_or(NetworkClass::Unknown, |kind| {
                NetworkClass::from_effective_type(&kind)
            })
    }
}

/// Current state of the reduced-motion media query, if the browser exposes it.
#[must_use]
pub fn reduced_motion_preference() -> Capability<bool> {
    dom::window()
        .and_then(|win| win.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|query| query.matches())
        .into()
}

impl EnvironmentProbe for BrowserProbe {
    fn probe(&self) -> EnvironmentSignals {
        let Some(win) = dom::window() else {
            log::debug!("no window; probing with defaults");
            return EnvironmentSignals::default();
        };
        let navigator = win.navigator();
        let nav_value: &JsValue = navigator.as_ref();
        let user_agent = navigator.user_agent().unwrap_or_default();

        let signals = EnvironmentSignals {
            logical_cores: Self::logical_cores(&navigator),
            device_memory_gb: Self::device_memory(nav_value),
            network: Self::network(nav_value),
            form_factor: FormFactor::from_user_agent(&user_agent),
            reduced_motion: reduced_motion_preference().into_option().unwrap_or(false),
        };
        log::debug!("probed environment: {signals:?}");
        signals
    }
}

/// Shared probe handle passed through component props.
///
/// Equality is pointer identity so re-renders with the same probe are cheap.
#[derive(Clone)]
pub struct ProbeHandle(pub Rc<dyn EnvironmentProbe>);

impl ProbeHandle {
    #[must_use]
    pub fn browser() -> Self {
        Self(Rc::new(BrowserProbe))
    }

    /// Wrap fixed signals, mostly for tests and server rendering.
    #[must_use]
    pub fn fixed(signals: EnvironmentSignals) -> Self {
        Self(Rc::new(signals))
    }
}

impl Default for ProbeHandle {
    fn default() -> Self {
        Self::browser()
    }
}

impl PartialEq for ProbeHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ProbeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProbeHandle").finish_non_exhaustive()
    }
}

impl EnvironmentProbe for ProbeHandle {
    fn probe(&self) -> EnvironmentSignals {
        self.0.probe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_perf::QualityTier;

    #[test]
    fn browser_probe_falls_back_off_browser() {
        let signals = BrowserProbe.probe();
        assert_eq!(signals, EnvironmentSignals::default());
        assert_eq!(vitrine_perf::detect(&signals), QualityTier::Low);
    }

    #[test]
    fn reduced_motion_unavailable_off_browser() {
        assert!(!reduced_motion_preference().is_available());
    }

    #[test]
    fn handle_equality_is_identity() {
        let a = ProbeHandle::fixed(EnvironmentSignals::default());
        let b = a.clone();
        let c = ProbeHandle::fixed(EnvironmentSignals::default());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(c.probe(), EnvironmentSignals::default());
    }
}
