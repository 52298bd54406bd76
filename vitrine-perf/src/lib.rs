//! Vitrine Performance Governance
//!
//! Platform-agnostic core of the portfolio's adaptive quality system: a
//! one-shot capability detector, the shared animation policy, and the
//! governor that lowers that policy when frame pacing falls short.
//! This crate has no browser dependencies; the web shell supplies an
//! [`EnvironmentProbe`] and drives the frame loop.

pub mod animation;
pub mod benchmark;
pub mod config;
pub mod constants;
pub mod detector;
pub mod environment;
pub mod governor;
pub mod numbers;
pub mod policy;
pub mod sampler;
pub mod tier;

// Re-export commonly used types
pub use animation::{AnimationKind, AnimationQuality, animation_duration, should_animate};
pub use benchmark::{BenchmarkReadings, DeviceScore};
pub use config::{GovernorConfig, GovernorConfigError, TierDurationScale, TierFrameRates};
pub use detector::{CapabilityProfile, detect};
pub use environment::{Capability, EnvironmentProbe, EnvironmentSignals, FormFactor, NetworkClass};
pub use governor::{Downgrade, PerformanceGovernor};
pub use policy::{OverrideReport, Policy, PolicyError, PolicyField, PolicyOverride};
pub use sampler::{FrameSampler, WindowSample};
pub use tier::{QualityTier, TierParseError};
