//! Consumer-side queries answered from a policy snapshot.
use serde::{Deserialize, Serialize};

use crate::config::GovernorConfig;
use crate::policy::Policy;
use crate::tier::QualityTier;

/// Cost class of an animation a consumer is about to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKind {
    /// Fades, slides, simple transitions.
    Basic,
    /// Transform-heavy hover effects, auto-rotation, blur layers.
    Complex,
    /// Particle emission.
    Particles,
}

/// Whether a consumer may run an animation of `kind` right now.
#[must_use]
pub fn should_animate(policy: &Policy, kind: AnimationKind) -> bool {
    let basic = policy.animations_enabled && !policy.reduced_motion_requested;
    match kind {
        AnimationKind::Basic => basic,
        AnimationKind::Complex => basic && policy.tier != QualityTier::Low,
        AnimationKind::Particles => policy.particles_enabled && policy.tier == QualityTier::High,
    }
}

/// Scale a base animation duration for the current tier.
/// Reduced motion collapses every duration to zero.
#[must_use]
pub fn animation_duration(policy: &Policy, base_ms: f64, cfg: &GovernorConfig) -> f64 {
    if policy.reduced_motion_requested {
        return 0.0;
    }
    base_ms * cfg.duration_scale_for(policy.tier)
}

/// Human-facing summary of how rich the current animation experience is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationQuality {
    Excellent,
    Good,
    Reduced,
    Adaptive,
}

impl AnimationQuality {
    #[must_use]
    pub fn evaluate(policy: &Policy) -> Self {
        match policy.tier {
            QualityTier::High if policy.animations_enabled && policy.particles_enabled => {
                Self::Excellent
            }
            QualityTier::Medium if policy.animations_enabled => Self::Good,
            QualityTier::Low if !policy.animations_enabled => Self::Reduced,
            _ => Self::Adaptive,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Reduced => "Reduced",
            Self::Adaptive => "Adaptive",
        }
    }
}

impl Policy {
    #[must_use]
    pub fn should_animate(&self, kind: AnimationKind) -> bool {
        should_animate(self, kind)
    }
}
