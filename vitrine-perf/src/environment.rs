//! Host environment signals consumed by the capability detector.
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::constants::{DEFAULT_DEVICE_MEMORY_GB, DEFAULT_LOGICAL_CORES, MOBILE_UA_PATTERN};

/// Network effective-type classification as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NetworkClass {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl NetworkClass {
    /// Map a Network Information API `effectiveType` string.
    #[must_use]
    pub fn from_effective_type(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "slow-2g" => Self::Slow2g,
            "2g" => Self::TwoG,
            "3g" => Self::ThreeG,
            "4g" => Self::FourG,
            _ => Self::Unknown,
        }
    }

    /// Only `slow-2g` and `2g` count as slow; unknown is treated as fast.
    #[must_use]
    pub const fn is_slow(self) -> bool {
        matches!(self, Self::Slow2g | Self::TwoG)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFactor {
    #[default]
    Desktop,
    Mobile,
}

fn mobile_ua_regex() -> Option<&'static Regex> {
    static MOBILE_UA: OnceLock<Option<Regex>> = OnceLock::new();
    MOBILE_UA
        .get_or_init(|| Regex::new(MOBILE_UA_PATTERN).ok())
        .as_ref()
}

impl FormFactor {
    /// Classify a user-agent string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if mobile_ua_regex().is_some_and(|re| re.is_match(user_agent)) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

/// One-shot snapshot of everything the detector looks at.
///
/// Optional fields model host facilities that may be missing; the
/// `resolved_*` accessors apply the conservative fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentSignals {
    #[serde(default)]
    pub logical_cores: Option<u32>,
    #[serde(default)]
    pub device_memory_gb: Option<f64>,
    #[serde(default)]
    pub network: NetworkClass,
    #[serde(default)]
    pub form_factor: FormFactor,
    #[serde(default)]
    pub reduced_motion: bool,
}

impl EnvironmentSignals {
    /// Logical processor count, 2 when unavailable or reported as zero.
    #[must_use]
    pub fn resolved_cores(&self) -> u32 {
        self.logical_cores
            .filter(|&cores| cores > 0)
            .unwrap_or(DEFAULT_LOGICAL_CORES)
    }

    /// Approximate memory in GB, 4 when unavailable or not a positive number.
    #[must_use]
    pub fn resolved_memory_gb(&self) -> f64 {
        self.device_memory_gb
            .filter(|gb| gb.is_finite() && *gb > 0.0)
            .unwrap_or(DEFAULT_DEVICE_MEMORY_GB)
    }

    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.form_factor.is_mobile()
    }

    #[must_use]
    pub const fn is_slow_network(&self) -> bool {
        self.network.is_slow()
    }

    #[must_use]
    pub const fn with_cores(mut self, cores: u32) -> Self {
        self.logical_cores = Some(cores);
        self
    }

    #[must_use]
    pub const fn with_memory_gb(mut self, gb: f64) -> Self {
        self.device_memory_gb = Some(gb);
        self
    }

    #[must_use]
    pub const fn with_network(mut self, network: NetworkClass) -> Self {
        self.network = network;
        self
    }

    #[must_use]
    pub const fn with_form_factor(mut self, form_factor: FormFactor) -> Self {
        self.form_factor = form_factor;
        self
    }

    #[must_use]
    pub const fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }
}

/// Source of environment signals.
/// The browser shell reads navigator facilities; tests pass a fixed snapshot.
pub trait EnvironmentProbe {
    /// Read the current signals. Must not fail: missing facilities map to `None`.
    fn probe(&self) -> EnvironmentSignals;
}

impl EnvironmentProbe for EnvironmentSignals {
    fn probe(&self) -> EnvironmentSignals {
        *self
    }
}

impl<P: EnvironmentProbe + ?Sized> EnvironmentProbe for &P {
    fn probe(&self) -> EnvironmentSignals {
        (**self).probe()
    }
}

impl<P: EnvironmentProbe + ?Sized> EnvironmentProbe for std::rc::Rc<P> {
    fn probe(&self) -> EnvironmentSignals {
        (**self).probe()
    }
}

impl<P: EnvironmentProbe + ?Sized> EnvironmentProbe for Box<P> {
    fn probe(&self) -> EnvironmentSignals {
        (**self).probe()
    }
}

/// Outcome of probing an optional host facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Capability<U> {
        match self {
            Self::Available(handle) => Capability::Available(f(handle)),
            Self::Unavailable => Capability::Unavailable,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(handle) => Some(handle),
            Self::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unavailable, Self::Available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_signals_fall_back_to_conservative_defaults() {
        let signals = EnvironmentSignals::default();
        assert_eq!(signals.resolved_cores(), 2);
        assert!((signals.resolved_memory_gb() - 4.0).abs() < f64::EPSILON);
        assert!(!signals.is_slow_network());
        assert!(!signals.is_mobile());
    }

    #[test]
    fn nonsense_values_use_defaults() {
        let signals = EnvironmentSignals::default()
            .with_cores(0)
            .with_memory_gb(f64::NAN);
        assert_eq!(signals.resolved_cores(), 2);
        assert!((signals.resolved_memory_gb() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn effective_type_maps_slow_classes() {
        assert!(NetworkClass::from_effective_type("slow-2g").is_slow());
        assert!(NetworkClass::from_effective_type("2G").is_slow());
        assert!(!NetworkClass::from_effective_type("3g").is_slow());
        assert!(!NetworkClass::from_effective_type("4g").is_slow());
        assert_eq!(
            NetworkClass::from_effective_type("satellite"),
            NetworkClass::Unknown
        );
    }

    #[test]
    fn user_agent_classifies_form_factor() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let android = "Mozilla/5.0 (Linux; android 14; Pixel 8)";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0";
        assert_eq!(FormFactor::from_user_agent(iphone), FormFactor::Mobile);
        assert_eq!(FormFactor::from_user_agent(android), FormFactor::Mobile);
        assert_eq!(FormFactor::from_user_agent(desktop), FormFactor::Desktop);
    }

    #[test]
    fn capability_converts_from_option() {
        let present: Capability<u8> = Some(3).into();
        assert!(present.is_available());
        assert_eq!(present.map(|v| v * 2).into_option(), Some(6));
        let missing: Capability<u8> = None.into();
        assert!(!missing.is_available());
    }

    #[test]
    fn signals_deserialize_with_missing_fields() {
        let signals: EnvironmentSignals =
            serde_json::from_str(r#"{"logical_cores":8,"network":"2g"}"#).unwrap();
        assert_eq!(signals.resolved_cores(), 8);
        assert!(signals.is_slow_network());
        assert!(!signals.reduced_motion);
    }
}
